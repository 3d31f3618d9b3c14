use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use services::AppServices;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trivia_core::model::RecordId;

mod config;
mod terminal;

use terminal::Terminal;

#[derive(Parser)]
#[command(name = "trivia", about = "Multiple-choice trivia quiz with saved responses")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SQLite database holding saved responses
    #[arg(long, global = true, env = "TRIVIA_DB_URL", default_value = config::DEFAULT_DB_URL)]
    db: String,

    /// JSON question file: [{"text", "options", "correct"}, ...]
    #[arg(long, global = true, env = "TRIVIA_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz (default)
    Quiz,
    /// Browse saved responses one at a time
    Responses {
        /// Start with this name filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Print saved responses as a table
    List {
        /// Only names containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete one saved response
    Delete {
        id: RecordId,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let db_url = config::normalize_sqlite_url(&cli.db);
    config::prepare_sqlite_file(&db_url)?;
    let questions = config::load_questions(cli.questions.as_deref())?;
    debug!(db = %db_url, questions = questions.len(), "starting");

    let app = AppServices::new_sqlite(&db_url, questions).await?;
    let mut term = Terminal::new(io::stdin().lock(), io::stdout().lock());

    match cli.command.unwrap_or(Commands::Quiz) {
        Commands::Quiz => {
            terminal::run_quiz(&app.quiz_loop(), &mut term).await?;
        }
        Commands::Responses { search } => {
            let mut browser = app.open_browser().await;
            if let Some(query) = search {
                browser.set_query(query);
            }
            terminal::run_browser(&mut browser, &mut term).await?;
        }
        Commands::List { search } => {
            let records = app.responses().search(search.as_deref().unwrap_or("")).await;
            if records.is_empty() {
                term.say("No saved responses.")?;
            } else {
                term.say(terminal::records_table(&records))?;
            }
        }
        Commands::Delete { id, yes } => {
            terminal::delete_record(&app.responses(), id, yes, &mut term).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
