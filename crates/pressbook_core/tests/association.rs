use pressbook_core::model::article::{parse_authors, parse_sources};
use pressbook_core::{
    Address, ArticleContainsPerson, ArticleData, ArticleStatus, Email, Link, Model, ModelError,
    ModelManager, Name, Person, PersonEdit, PersonPredicate, Phone, PublicationDate, Title,
};
use std::collections::BTreeSet;

fn person(name: &str, phone: &str) -> Person {
    Person::new(
        Name::parse(name).unwrap(),
        Phone::parse(phone).unwrap(),
        Email::parse("desk@example.com").unwrap(),
        Address::parse("12 Quay Road").unwrap(),
        BTreeSet::new(),
    )
}

fn article(title: &str) -> ArticleData {
    ArticleData {
        title: Title::parse(title).unwrap(),
        authors: parse_authors(["Jane Doe"]).unwrap(),
        publication_date: PublicationDate::parse("10-05-2024 14:00").unwrap(),
        sources: parse_sources(["Harbour Board"]).unwrap(),
        outlets: BTreeSet::new(),
        tags: BTreeSet::new(),
        status: ArticleStatus::Published,
        link: Link::default(),
    }
}

fn seeded() -> (ModelManager, [Person; 3]) {
    let mut model = ModelManager::in_memory();
    let people = [
        person("Alice Pauline", "94351253"),
        person("Benson Meier", "98765432"),
        person("Carl Kurz", "95352563"),
    ];
    for entry in &people {
        model.add_person(entry.clone()).unwrap();
    }
    (model, people)
}

#[test]
fn set_then_get_returns_the_same_ordered_list() {
    let (mut model, [p1, p2, p3]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();

    assert!(model.associated_persons(id).unwrap().is_empty());

    let order = vec![p3.clone(), p1.clone(), p2.clone()];
    assert_eq!(model.set_associated_persons(id, order.clone()).unwrap(), 3);
    assert_eq!(model.associated_persons(id).unwrap(), order);

    model.set_associated_persons(id, vec![p2.clone()]).unwrap();
    assert_eq!(model.associated_persons(id).unwrap(), vec![p2]);
}

#[test]
fn each_article_keeps_its_own_list() {
    let (mut model, [p1, p2, _]) = seeded();
    let harbour = model.add_article(article("Harbour")).unwrap();
    let airport = model.add_article(article("Airport")).unwrap();

    model.set_associated_persons(harbour, vec![p1.clone()]).unwrap();
    model.set_associated_persons(airport, vec![p2.clone()]).unwrap();

    assert_eq!(model.associated_persons(harbour).unwrap(), vec![p1]);
    assert_eq!(model.associated_persons(airport).unwrap(), vec![p2]);
}

#[test]
fn article_predicate_matches_by_key() {
    let (_, [p1, p2, p3]) = seeded();
    let predicate = PersonPredicate::InArticle(ArticleContainsPerson::from_persons(&[
        p1.clone(),
        p3.clone(),
    ]));

    assert!(predicate.test(&p1));
    assert!(!predicate.test(&p2));
    assert!(predicate.test(&p3));

    let relocated = p1.edited(PersonEdit {
        address: Some(Address::parse("1 New Street").unwrap()),
        ..PersonEdit::default()
    });
    assert!(predicate.test(&relocated));

    let renumbered = p1.edited(PersonEdit {
        phone: Some(Phone::parse("80000000").unwrap()),
        ..PersonEdit::default()
    });
    assert!(!predicate.test(&renumbered));
}

#[test]
fn lookup_article_shows_registry_order_restricted_to_article() {
    let (mut model, [p1, p2, p3]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model
        .set_associated_persons(id, vec![p3.clone(), p1.clone()])
        .unwrap();

    model.lookup_article(&id.to_string()).unwrap();
    assert_eq!(model.filtered_person_list(), vec![p1, p3]);
    assert!(!model.filtered_person_list().contains(&p2));
}

#[test]
fn lookup_of_missing_article_keeps_the_current_view() {
    let (mut model, [p1, _, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model.set_associated_persons(id, vec![p1.clone()]).unwrap();
    model.lookup_article("0").unwrap();

    let err = model.lookup_article("42").unwrap_err();
    assert_eq!(err.to_string(), "No article found with ID: 42");
    assert_eq!(model.filtered_person_list(), vec![p1]);
}

#[test]
fn edited_person_is_seen_through_the_association() {
    let (mut model, [p1, _, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model.set_associated_persons(id, vec![p1.clone()]).unwrap();

    let edited = p1.edited(PersonEdit {
        email: Some(Email::parse("alice@example.com").unwrap()),
        ..PersonEdit::default()
    });
    model.set_person(&p1.key(), edited.clone()).unwrap();

    assert_eq!(model.associated_persons(id).unwrap(), vec![edited]);
}

#[test]
fn renamed_person_stays_associated() {
    let (mut model, [p1, p2, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model
        .set_associated_persons(id, vec![p1.clone(), p2.clone()])
        .unwrap();

    let renamed = p1.edited(PersonEdit {
        name: Some(Name::parse("Alicia Pauline").unwrap()),
        ..PersonEdit::default()
    });
    model.set_person(&p1.key(), renamed.clone()).unwrap();

    assert_eq!(
        model.associated_persons(id).unwrap(),
        vec![renamed.clone(), p2.clone()]
    );
    model.lookup_article("0").unwrap();
    assert_eq!(model.filtered_person_list(), vec![renamed, p2]);
}

#[test]
fn renaming_while_article_is_shown_keeps_the_view() {
    let (mut model, [p1, _, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model.set_associated_persons(id, vec![p1.clone()]).unwrap();
    model.lookup_article("0").unwrap();

    let renumbered = p1.edited(PersonEdit {
        phone: Some(Phone::parse("80000000").unwrap()),
        ..PersonEdit::default()
    });
    model.set_person(&p1.key(), renumbered.clone()).unwrap();

    assert_eq!(model.filtered_person_list(), vec![renumbered]);
}

#[test]
fn removed_person_is_not_retracted() {
    let (mut model, [p1, p2, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model
        .set_associated_persons(id, vec![p1.clone(), p2.clone()])
        .unwrap();

    model.remove_person(&p1.key()).unwrap();
    assert_eq!(model.associated_persons(id).unwrap(), vec![p1, p2]);
}

#[test]
fn removed_article_has_no_association() {
    let (mut model, [p1, _, _]) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    model.set_associated_persons(id, vec![p1]).unwrap();
    model.remove_article(id).unwrap();

    assert!(matches!(
        model.associated_persons(id),
        Err(ModelError::ArticleNotFound(_))
    ));
    assert!(model.set_article_persons("0", Vec::new()).is_err());
}

#[test]
fn unregistered_persons_are_accepted() {
    let (mut model, _) = seeded();
    let id = model.add_article(article("Harbour")).unwrap();
    let stranger = person("Dana Lee", "91234567");

    model.set_associated_persons(id, vec![stranger.clone()]).unwrap();
    assert_eq!(model.associated_persons(id).unwrap(), vec![stranger]);
}
