use storage::repository::{KeyValueStore, Storage};
use storage::responses::{COUNTER_KEY, DeleteOutcome, RECORDS_KEY};
use storage::sqlite::SqliteRepository;
use trivia_core::model::{AnswerSet, Confirmation, RecordId};

fn answers() -> AnswerSet {
    [("Q1", "A"), ("Q2", "X")].into_iter().collect()
}

#[tokio::test]
async fn sqlite_kv_roundtrip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("missing").await.unwrap(), None);

    repo.set("k", "v1").await.unwrap();
    repo.set("k", "v2").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v2"));

    repo.set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
        .await
        .unwrap();
    assert_eq!(repo.get("a").await.unwrap().as_deref(), Some("1"));
    assert_eq!(repo.get("b").await.unwrap().as_deref(), Some("2"));

    repo.remove("k").await.unwrap();
    repo.remove("k").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
    repo.set("k", "v").await.unwrap();
    assert_eq!(repo.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn sqlite_response_store_follows_counter_rules() {
    let storage = Storage::sqlite("sqlite:file:memdb_responses?mode=memory&cache=shared")
        .await
        .expect("storage");
    let responses = storage.responses();

    let ana = responses.append("Ana", &answers(), 5).await.unwrap();
    let beto = responses.append("Beto", &answers(), 3).await.unwrap();
    assert_eq!(ana, RecordId::new(1));
    assert_eq!(beto, RecordId::new(2));

    let outcome = responses.delete(ana, Confirmation::Confirmed).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);

    let all = responses.load_all().await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[&beto].name, "Beto");
    assert_eq!(
        storage.kv.get(COUNTER_KEY).await.unwrap().as_deref(),
        Some("2")
    );
}

#[tokio::test]
async fn sqlite_corrupt_records_degrade_to_empty() {
    let storage = Storage::sqlite("sqlite:file:memdb_corrupt?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.kv.set(RECORDS_KEY, "[]oops").await.unwrap();

    let responses = storage.responses();
    assert!(responses.load_all().await.is_empty());
    assert!(responses.search("ana").await.is_empty());

    let id = responses.append("Ana", &answers(), 1).await.unwrap();
    assert_eq!(id, RecordId::new(1));
}

#[tokio::test]
async fn records_survive_reconnect_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("trivia.sqlite3");
    let url = format!("sqlite://{}?mode=rwc", path.display());

    {
        let storage = Storage::sqlite(&url).await.expect("first open");
        let responses = storage.responses();
        responses.append("Ana", &answers(), 2).await.unwrap();
        responses.append("Beto", &answers(), 1).await.unwrap();
    }

    let storage = Storage::sqlite(&url).await.expect("reopen");
    let responses = storage.responses();
    let names: Vec<String> = responses
        .search("")
        .await
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["Ana", "Beto"]);

    let next = responses.append("Cata", &answers(), 0).await.unwrap();
    assert_eq!(next, RecordId::new(3));
}
