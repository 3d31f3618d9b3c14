//! Line-oriented front-end for the quiz and the saved-responses browser.

use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use services::{BrowserError, QuizError, QuizFlowError, QuizLoopService, QuizSession, ResponseBrowser};
use storage::responses::{DeleteOutcome, ResponseStore};
use tracing::warn;
use trivia_core::model::{Confirmation, RecordId, ScoredRecord};

/// Prompt/reply channel; stdin/stdout in the binary, buffers in tests.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Print `prompt` and read one line. `None` means end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn confirm(&mut self, prompt: &str) -> io::Result<Confirmation> {
        Ok(self
            .ask(prompt)?
            .map_or(Confirmation::Declined, |reply| Confirmation::from_reply(&reply)))
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// Run one quiz from name entry to results.
///
/// Returns the id of the stored record, or `None` if the participant quit or
/// the response could not be saved. Results are shown either way once the
/// last question is checked.
pub async fn run_quiz<R: BufRead, W: Write>(
    quiz: &QuizLoopService,
    term: &mut Terminal<R, W>,
) -> Result<Option<RecordId>> {
    let mut session = quiz.start_session();

    while !session.is_name_submitted() {
        let Some(name) = term.ask("Name: ")? else {
            return Ok(None);
        };
        if let Err(err) = session.submit_name(&name) {
            term.say(err)?;
        }
    }

    while !session.is_results_shown() {
        render_question(&session, term)?;
        let Some(reply) = term.ask("> ")? else {
            term.say("Quiz abandoned; nothing was saved.")?;
            return Ok(None);
        };

        match reply.trim() {
            "n" | "next" => match quiz.advance(&mut session).await {
                Ok(_) => {}
                Err(QuizFlowError::Storage(err)) => {
                    warn!(error = %err, "saving quiz response failed");
                    term.say(format_args!("Your response could not be saved: {err}"))?;
                }
                Err(err) => return Err(err.into()),
            },
            "p" | "prev" => {
                if let Err(QuizError::AtFirstQuestion) = session.retreat() {
                    term.say("Already at the first question.")?;
                }
            }
            "q" | "quit" => {
                term.say("Quiz abandoned; nothing was saved.")?;
                return Ok(None);
            }
            other => select_by_number(&mut session, other, term)?,
        }
    }

    render_results(&session, term)?;
    Ok(session.record_id())
}

fn select_by_number<R: BufRead, W: Write>(
    session: &mut QuizSession,
    reply: &str,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    let option = reply
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.current_question()?.options().get(i).cloned());

    match option {
        Some(option) => {
            if let Err(err) = session.select_answer(&option) {
                term.say(err)?;
            }
            Ok(())
        }
        None => term.say("Type an option number, n (next), p (previous) or q (quit)."),
    }
}

fn render_question<R: BufRead, W: Write>(
    session: &QuizSession,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    let (Some(question), Some(progress)) = (session.current_question(), session.progress()) else {
        return Ok(());
    };
    let selected = session.selected_answer();

    term.say("")?;
    term.say(format_args!(
        "Question {} / {}: {}",
        progress.position(),
        progress.total,
        question.text()
    ))?;
    for (i, option) in question.options().iter().enumerate() {
        let marker = if selected == Some(option.as_str()) { '*' } else { ' ' };
        term.say(format_args!(" {marker} {}) {option}", i + 1))?;
    }

    let next = if progress.is_last { "n = check answers" } else { "n = next" };
    if progress.index > 0 {
        term.say(format_args!("[1-{}] choose, p = previous, {next}, q = quit", question.options().len()))
    } else {
        term.say(format_args!("[1-{}] choose, {next}, q = quit", question.options().len()))
    }
}

fn render_results<R: BufRead, W: Write>(
    session: &QuizSession,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    term.say("")?;
    term.say("Results")?;
    for graded in session.graded_answers() {
        let verdict = if graded.is_correct { "correct" } else { "wrong" };
        term.say(graded.question.text())?;
        term.say(format_args!(
            "  Your answer: {} ({verdict})",
            graded.chosen.unwrap_or("(none)")
        ))?;
        term.say(format_args!("  Correct answer: {}", graded.correct_option()))?;
    }
    term.say(format_args!(
        "Score: {} / {}",
        session.score().unwrap_or(0),
        session.questions().len()
    ))?;
    if let Some(id) = session.record_id() {
        term.say(format_args!("Saved as response #{id}."))?;
    }
    Ok(())
}

//
// ─── SAVED RESPONSES ───────────────────────────────────────────────────────────
//

/// Interactive one-record-at-a-time browser with search and delete.
pub async fn run_browser<R: BufRead, W: Write>(
    browser: &mut ResponseBrowser,
    term: &mut Terminal<R, W>,
) -> Result<()> {
    loop {
        render_current(browser, term)?;
        let Some(reply) = term.ask("> ")? else {
            return Ok(());
        };
        let reply = reply.trim();

        if let Some(query) = reply.strip_prefix('/') {
            browser.set_query(query.trim());
            continue;
        }

        match reply {
            "n" | "next" => {
                browser.next();
            }
            "p" | "prev" => {
                browser.previous();
            }
            "d" | "delete" => {
                let Some(id) = browser.current().map(|r| r.id) else {
                    term.say("Nothing to delete.")?;
                    continue;
                };
                let confirmation = term.confirm(&format!("Delete response #{id}? [y/N] "))?;
                match browser.delete(id, confirmation).await {
                    Ok(outcome) => report_delete(id, outcome, term)?,
                    Err(BrowserError::NothingSelected) => term.say("Nothing to delete.")?,
                    Err(err) => return Err(err.into()),
                }
            }
            "q" | "quit" => return Ok(()),
            _ => term.say("Commands: n (next), p (previous), /text (search), d (delete), q (quit).")?,
        }
    }
}

fn render_current<R: BufRead, W: Write>(
    browser: &ResponseBrowser,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    term.say("")?;
    let Some(record) = browser.current() else {
        if browser.query().is_empty() {
            return term.say("No saved responses.");
        }
        return term.say(format_args!("No saved responses match {:?}.", browser.query()));
    };

    term.say(format_args!(
        "Response {} / {} (#{})",
        browser.cursor() + 1,
        browser.results().len(),
        record.id
    ))?;
    render_record(record, term)
}

fn render_record<R: BufRead, W: Write>(
    record: &ScoredRecord,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    term.say(format_args!("Name: {}", record.name))?;
    term.say(format_args!("Score: {}", record.score))?;
    for (question, answer) in record.answers.iter() {
        term.say(format_args!("  {question}: {answer}"))?;
    }
    Ok(())
}

fn report_delete<R: BufRead, W: Write>(
    id: RecordId,
    outcome: DeleteOutcome,
    term: &mut Terminal<R, W>,
) -> io::Result<()> {
    match outcome {
        DeleteOutcome::Deleted => term.say(format_args!("Deleted response #{id}.")),
        DeleteOutcome::NotFound => term.say(format_args!("Response #{id} does not exist.")),
        DeleteOutcome::Declined => term.say("Delete cancelled."),
    }
}

//
// ─── ONE-SHOT COMMANDS ─────────────────────────────────────────────────────────
//

/// Table of records for `trivia list`.
pub fn records_table(records: &[ScoredRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Id", "Name", "Score", "Answered"]);
    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            record.name.clone(),
            record.score.to_string(),
            record.answers.len().to_string(),
        ]);
    }
    table
}

/// `trivia delete`: remove one record, asking first unless pre-confirmed.
pub async fn delete_record<R: BufRead, W: Write>(
    store: &ResponseStore,
    id: RecordId,
    confirmed: bool,
    term: &mut Terminal<R, W>,
) -> Result<DeleteOutcome> {
    let Some(record) = store.get(id).await else {
        report_delete(id, DeleteOutcome::NotFound, term)?;
        return Ok(DeleteOutcome::NotFound);
    };

    let confirmation = if confirmed {
        Confirmation::Confirmed
    } else {
        render_record(&record, term)?;
        term.confirm(&format!("Delete response #{id}? [y/N] "))?
    };

    let outcome = store.delete(id, confirmation).await?;
    report_delete(id, outcome, term)?;
    Ok(outcome)
}
