use pressbook_core::model::article::{parse_authors, parse_sources};
use pressbook_core::{
    execute_line, parse_command, Address, ArticleData, ArticleId, ArticleStatus, Command, Email,
    Index, Link, Model, ModelManager, Name, ParseError, Person, Phone, PublicationDate, Title,
};
use std::collections::BTreeSet;

fn person(name: &str, phone: &str) -> Person {
    Person::new(
        Name::parse(name).unwrap(),
        Phone::parse(phone).unwrap(),
        Email::parse("someone@example.com").unwrap(),
        Address::parse("1 Main St").unwrap(),
        BTreeSet::new(),
    )
}

fn article(title: &str, status: ArticleStatus) -> ArticleData {
    ArticleData {
        title: Title::parse(title).unwrap(),
        authors: parse_authors(["Jane Doe"]).unwrap(),
        publication_date: PublicationDate::parse("01-03-2024 09:30").unwrap(),
        sources: parse_sources(["City Desk"]).unwrap(),
        outlets: BTreeSet::new(),
        tags: BTreeSet::new(),
        status,
        link: Link::default(),
    }
}

fn alice_and_bob() -> ModelManager {
    let mut model = ModelManager::in_memory();
    model.add_person(person("Alice", "111")).unwrap();
    model.add_person(person("Bob", "222")).unwrap();
    model
}

#[test]
fn lookup_last_displayed_index_selects_that_person() {
    let mut model = alice_and_bob();

    let result = execute_line(&mut model, "lookup 2");
    assert!(result.success);
    assert!(result.message.starts_with("Lookup Person: Bob"));
    assert_eq!(model.looked_up_person(), Some(person("Bob", "222")));
}

#[test]
fn lookup_past_end_fails_without_changing_state() {
    let mut model = alice_and_bob();
    let before = model.filtered_person_list();

    let result = execute_line(&mut model, "lookup 3");
    assert!(!result.success);
    assert_eq!(result.message, "The person index provided is invalid");
    assert_eq!(model.filtered_person_list(), before);
    assert_eq!(model.looked_up_person(), None);
}

#[test]
fn lookup_rejects_non_positive_or_missing_index() {
    assert_eq!(parse_command("lookup 0"), Err(ParseError::InvalidIndex));
    assert_eq!(parse_command("lookup -1"), Err(ParseError::InvalidIndex));
    assert_eq!(parse_command("lookup one"), Err(ParseError::InvalidIndex));
    assert!(matches!(
        parse_command("lookup"),
        Err(ParseError::InvalidFormat { .. })
    ));
    assert_eq!(
        parse_command("  lookup   1  "),
        Ok(Command::LookupPerson(Index::from_one_based(1).unwrap()))
    );
}

#[test]
fn lookup_indexes_into_the_filtered_list() {
    let mut model = alice_and_bob();
    assert!(execute_line(&mut model, "find bob").success);

    let result = execute_line(&mut model, "lookup 1");
    assert!(result.message.starts_with("Lookup Person: Bob"));
    assert!(!execute_line(&mut model, "lookup 2").success);
}

#[test]
fn lookup_article_then_list_restores_everyone() {
    let mut model = alice_and_bob();
    model
        .add_article(article("Harbour", ArticleStatus::Published))
        .unwrap();

    assert!(execute_line(&mut model, "set-persons 0 2").success);
    let result = execute_line(&mut model, "lookup-article 0");
    assert!(result.success);
    assert_eq!(result.message, "Persons in Article shown");
    assert_eq!(model.filtered_person_list(), vec![person("Bob", "222")]);

    assert!(execute_line(&mut model, "list").success);
    assert_eq!(model.filtered_person_list().len(), 2);
}

#[test]
fn lookup_article_unknown_id_reports_it() {
    let mut model = alice_and_bob();

    let result = execute_line(&mut model, "lookup-article 7");
    assert!(!result.success);
    assert_eq!(result.message, "No article found with ID: 7");
    assert_eq!(model.filtered_person_list().len(), 2);
}

#[test]
fn set_persons_with_bad_index_changes_nothing() {
    let mut model = alice_and_bob();
    let id = model
        .add_article(article("Harbour", ArticleStatus::Published))
        .unwrap();
    assert!(execute_line(&mut model, "set-persons 0 1").success);

    let result = execute_line(&mut model, "set-persons 0 2 5");
    assert!(!result.success);
    assert_eq!(result.message, "The person index provided is invalid");
    assert_eq!(
        model.associated_persons(id).unwrap(),
        vec![person("Alice", "111")]
    );
}

#[test]
fn set_persons_collapses_repeated_indices_and_accepts_none() {
    let mut model = alice_and_bob();
    let id = model
        .add_article(article("Harbour", ArticleStatus::Published))
        .unwrap();

    let result = execute_line(&mut model, "set-persons 0 2 1 2");
    assert_eq!(result.message, "Persons of Article 0 updated: 2");
    assert_eq!(
        model.associated_persons(id).unwrap(),
        vec![person("Bob", "222"), person("Alice", "111")]
    );

    assert!(execute_line(&mut model, "set-persons 0").success);
    assert!(model.associated_persons(id).unwrap().is_empty());
}

#[test]
fn set_status_changes_status_case_insensitively() {
    let mut model = alice_and_bob();
    let id = model
        .add_article(article("Harbour", ArticleStatus::Draft))
        .unwrap();

    let result = execute_line(&mut model, "set-status 0 PUBLISHED");
    assert!(result.success);
    assert_eq!(result.message, "Article 0 status set to PUBLISHED");
    assert_eq!(
        model.get_article(id).unwrap().status(),
        ArticleStatus::Published
    );
}

#[test]
fn set_status_rejects_unknown_status() {
    let mut model = alice_and_bob();
    let id = model
        .add_article(article("Harbour", ArticleStatus::Draft))
        .unwrap();

    let result = execute_line(&mut model, "set-status 0 retracted");
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Invalid status provided. Please provide either draft, published or archived."
    );
    assert_eq!(model.get_article(id).unwrap().status(), ArticleStatus::Draft);
}

#[test]
fn publishing_a_draft_that_clashes_is_refused() {
    let mut model = alice_and_bob();
    model
        .add_article(article("Harbour", ArticleStatus::Published))
        .unwrap();
    let draft = model
        .add_article(article("Harbour", ArticleStatus::Draft))
        .unwrap();
    assert_eq!(draft, ArticleId::new(1));

    let result = execute_line(&mut model, "set-status 1 archived");
    assert!(!result.success);
    assert_eq!(
        result.message,
        "This article already exists in the article book: Harbour"
    );
    assert_eq!(
        model.get_article(draft).unwrap().status(),
        ArticleStatus::Draft
    );
}

#[test]
fn list_articles_shows_ids_titles_and_status() {
    let mut model = alice_and_bob();
    assert_eq!(
        execute_line(&mut model, "list-articles").message,
        "No articles tracked"
    );

    model
        .add_article(article("Harbour", ArticleStatus::Published))
        .unwrap();
    model
        .add_article(article("Airport", ArticleStatus::Draft))
        .unwrap();
    assert_eq!(
        execute_line(&mut model, "list-articles").message,
        "Listed all articles:\n[0] Harbour (PUBLISHED)\n[1] Airport (DRAFT)"
    );
}

#[test]
fn malformed_input_reports_usage() {
    let mut model = alice_and_bob();

    let result = execute_line(&mut model, "set-status 0");
    assert!(!result.success);
    assert!(result.message.starts_with("Invalid command format! \nset-status:"));

    let result = execute_line(&mut model, "   ");
    assert!(!result.success);
    assert_eq!(result.message, "Please enter a command. Type `help` for usage.");
}
