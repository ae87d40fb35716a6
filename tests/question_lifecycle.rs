/// End-to-end tests of the question store through the public API.
///
/// Covers the full create / get / search / link / withdraw cycle against
/// in-memory and file-based SQLite databases.
use anyhow::Result;
use kbase::{Database, Error, LinkOutcome, NewQuestion, QuestionId, QuestionService};
use tempfile::tempdir;

#[test]
fn documented_walkthrough() -> Result<()> {
    // Arrange
    let service = QuestionService::new(Database::in_memory()?);

    // Act: create a question tagged topic=math,algebra
    let id = service.create_question(&NewQuestion::new("Q1", "A1").tag("topic", ["math", "algebra"]))?;

    // Assert
    assert_eq!(id, QuestionId::new(1));

    let question = service.get_question(id)?.expect("question should exist");
    assert_eq!(question.title, "Q1");
    assert_eq!(question.answer, "A1");
    assert_eq!(question.tags["topic"], vec!["math", "algebra"]);

    let found = service.search_questions("topic", &["math"])?;
    assert_eq!(found, vec![question]);

    assert_eq!(service.withdraw_tags(id, "topic", &["math"])?, 1);

    let question = service.get_question(id)?.expect("question should exist");
    assert_eq!(question.tags["topic"], vec!["algebra"]);

    Ok(())
}

#[test]
fn overlapping_link_calls_count_each_value_once() -> Result<()> {
    let service = QuestionService::new(Database::in_memory()?);
    let id = service.create_question(&NewQuestion::new("Q", "A"))?;

    let first = service.link_tags(id, "topic", &["math", "physics"])?;
    let second = service.link_tags(id, "topic", &["physics", "chemistry"])?;

    assert_eq!(first, LinkOutcome { created: 2, existed: 0 });
    assert_eq!(second, LinkOutcome { created: 1, existed: 1 });

    let question = service.get_question(id)?.expect("question should exist");
    assert_eq!(question.tags["topic"], vec!["math", "physics", "chemistry"]);

    Ok(())
}

#[test]
fn withdrawn_tags_no_longer_match_search() -> Result<()> {
    let service = QuestionService::new(Database::in_memory()?);
    let q1 = service.create_question(&NewQuestion::new("Q1", "A1").tag("topic", ["math"]))?;
    let q2 = service.create_question(&NewQuestion::new("Q2", "A2").tag("topic", ["math"]))?;

    service.withdraw_tags(q1, "topic", &["math"])?;

    let found: Vec<QuestionId> = service
        .search_questions("topic", &["math"])?
        .into_iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(found, vec![q2]);

    // Relinking reuses the stored tag value.
    let outcome = service.link_tags(q1, "topic", &["math"])?;
    assert_eq!(outcome, LinkOutcome { created: 0, existed: 1 });

    Ok(())
}

#[test]
fn removal_is_reported_as_not_supported() -> Result<()> {
    let service = QuestionService::new(Database::in_memory()?);
    let id = service.create_question(&NewQuestion::new("Q", "A"))?;

    match service.remove_question(id) {
        Err(Error::NotSupported(operation)) => assert_eq!(operation, "question removal"),
        other => panic!("expected NotSupported, got {other:?}"),
    }

    Ok(())
}

#[test]
fn questions_and_tags_survive_reopen() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("knowledge.db");

    let id = {
        let service = QuestionService::new(Database::open(&db_path)?);
        service.create_question(
            &NewQuestion::new("Persistent", "yes")
                .tag("topic", ["storage"])
                .tag("level", ["intro", "basics"]),
        )?
    };

    let service = QuestionService::new(Database::open(&db_path)?);
    let question = service.get_question(id)?.expect("question should persist");

    assert_eq!(question.title, "Persistent");
    assert_eq!(question.tags["topic"], vec!["storage"]);
    assert_eq!(question.tags["level"], vec!["intro", "basics"]);

    // Tag rows are shared with questions created after reopening.
    let outcome = service.link_tags(id, "level", &["intro", "advanced"])?;
    assert_eq!(outcome, LinkOutcome { created: 1, existed: 1 });

    Ok(())
}

#[test]
fn two_connections_share_tag_rows() -> Result<()> {
    let dir = tempdir()?;
    let db_path = dir.path().join("shared.db");

    let first = QuestionService::new(Database::open(&db_path)?);
    let second = QuestionService::new(Database::open(&db_path)?);

    first.create_question(&NewQuestion::new("Q1", "A1").tag("topic", ["math"]))?;
    second.create_question(&NewQuestion::new("Q2", "A2").tag("topic", ["math"]))?;

    let (names, values): (i64, i64) = first.database().connection().query_row(
        "SELECT (SELECT COUNT(*) FROM tag_names), (SELECT COUNT(*) FROM tag_values)",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    assert_eq!(names, 1);
    assert_eq!(values, 1);
    assert_eq!(second.search_questions("topic", &["math"])?.len(), 2);

    Ok(())
}
