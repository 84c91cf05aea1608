//! Relationship loading and writes against a live database.

mod common;

use common::{
    insert_content_unit, insert_sources, random_author, random_file, random_tag, TestDatabase,
};
use mdb_models::models::{
    Author, ContentRole, ContentUnit, ContentUnitsPerson, File, Person, PersonI18n, Publisher,
    Source, Tag,
};
use mdb_models::relation::detach;
use mdb_models::{Columns, ModelError, Models, Table};

#[test]
fn test_to_one_set_load_remove() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let mut sources = insert_sources(&models, &tx, 3);

    let mut parent = sources[0].clone();
    Source::PARENT.set(&models, &tx, &mut sources[1], &mut parent, false).unwrap();
    assert_eq!(sources[1].parent_id, Some(parent.id));

    let parents = Source::PARENT.load(&tx, &sources).unwrap();
    assert_eq!(parents[0], None);
    assert_eq!(parents[1].as_ref().map(|p| p.id), Some(parent.id));
    assert_eq!(parents[2], None);

    let types = Source::SOURCE_TYPE.load(&tx, &sources).unwrap();
    assert!(types.iter().all(|t| t.as_ref().map(|t| t.id) == Some(sources[0].type_id)));

    Source::PARENT.remove(&models, &tx, &mut sources[1]).unwrap();
    assert_eq!(sources[1].parent_id, None);
    assert_eq!(Source::query().where_null("parent_id").count(&tx).unwrap(), 3);
}

#[test]
fn test_to_one_set_inserts_related() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let unit = insert_content_unit(&models, &tx);

    let mut file = random_file();
    models.insert(&tx, &mut file, Columns::Infer).unwrap();
    let mut derived = random_file();
    derived.content_unit_id = Some(unit.id);

    File::PARENT.set(&models, &tx, &mut file, &mut derived, true).unwrap();
    assert!(derived.id > 0);
    assert_eq!(file.parent_id, Some(derived.id));
    assert_eq!(File::CHILDREN.query(&derived).unwrap().count(&tx).unwrap(), 1);
}

#[test]
fn test_to_many_add_set_remove() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let unit = insert_content_unit(&models, &tx);
    let other = insert_content_unit(&models, &tx);

    let mut files: Vec<File> = (0..3).map(|_| random_file()).collect();
    ContentUnit::FILES.add(&models, &tx, &unit, &mut files, true).unwrap();
    assert!(files.iter().all(|f| f.id > 0 && f.content_unit_id == Some(unit.id)));
    assert_eq!(ContentUnit::FILES.query(&unit).unwrap().count(&tx).unwrap(), 3);

    let loaded = ContentUnit::FILES.load(&tx, &[unit.clone(), other.clone()]).unwrap();
    assert_eq!(loaded[0].len(), 3);
    assert!(loaded[1].is_empty());

    ContentUnit::FILES.remove(&models, &tx, &unit, &mut files[..1]).unwrap();
    assert_eq!(files[0].content_unit_id, None);
    assert_eq!(ContentUnit::FILES.query(&unit).unwrap().count(&tx).unwrap(), 2);

    // Moving the last file away leaves the first unit with one.
    ContentUnit::FILES.set(&models, &tx, &other, &mut files[2..], false).unwrap();
    assert_eq!(ContentUnit::FILES.query(&unit).unwrap().count(&tx).unwrap(), 1);
    assert_eq!(ContentUnit::FILES.query(&other).unwrap().count(&tx).unwrap(), 1);

    let mut remaining = loaded[0].clone();
    let expected: Vec<i64> = remaining
        .iter()
        .map(|f| f.id)
        .filter(|id| *id != files[0].id)
        .collect();
    detach(&mut remaining, &files[..1]);
    let ids: Vec<i64> = remaining.iter().map(|f| f.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_many_to_many_add_load_remove() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let sources = insert_sources(&models, &tx, 2);

    let mut authors: Vec<Author> = vec![
        Author { code: "rbs".into(), ..random_author() },
        Author { code: "bhs".into(), ..random_author() },
    ];
    Source::AUTHORS.add(&models, &tx, &sources[0], &mut authors, true).unwrap();
    Source::AUTHORS.add(&models, &tx, &sources[1], &mut authors[..1], false).unwrap();

    let loaded = Source::AUTHORS.load(&tx, &sources).unwrap();
    assert_eq!(loaded[0].len(), 2);
    assert_eq!(loaded[1].len(), 1);
    assert_eq!(loaded[1][0], authors[0]);

    let reverse = Author::SOURCES.load(&tx, &authors).unwrap();
    assert_eq!(reverse[0].len(), 2);
    assert_eq!(reverse[1].len(), 1);

    Source::AUTHORS.remove(&tx, &sources[0], &authors[..1]).unwrap();
    assert_eq!(Source::AUTHORS.query(&sources[0]).unwrap().count(&tx).unwrap(), 1);
    // The author row itself is kept.
    assert_eq!(Author::query().count(&tx).unwrap(), 2);
}

#[test]
fn test_many_to_many_set_replaces_links() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let unit = insert_content_unit(&models, &tx);

    let mut first: Vec<Tag> = (0..2).map(|_| random_tag()).collect();
    ContentUnit::TAGS.set(&models, &tx, &unit, &mut first, true).unwrap();
    assert_eq!(ContentUnit::TAGS.query(&unit).unwrap().count(&tx).unwrap(), 2);

    let mut second = vec![random_tag()];
    ContentUnit::TAGS.set(&models, &tx, &unit, &mut second, true).unwrap();
    let tags = ContentUnit::TAGS.query(&unit).unwrap().all(&tx).unwrap();
    assert_eq!(tags, second);
    assert_eq!(Tag::CONTENT_UNITS.load(&tx, &first).unwrap(), vec![vec![], vec![]]);
}

#[test]
fn test_content_unit_persons_and_publishers() {
    let Some(db) = TestDatabase::connect() else { return };
    let tx = db.begin();
    let models = Models::new();
    let unit = insert_content_unit(&models, &tx);

    let mut lecturer = ContentRole {
        name: "lecturer".into(),
        ..Default::default()
    };
    models.insert(&tx, &mut lecturer, Columns::Infer).unwrap();
    let mut rav = Person {
        uid: common::uid(),
        pattern: Some("rav".into()),
        ..Default::default()
    };
    models.insert(&tx, &mut rav, Columns::Infer).unwrap();

    let mut credits = vec![ContentUnitsPerson {
        person_id: rav.id,
        role_id: lecturer.id,
        ..Default::default()
    }];
    ContentUnit::CONTENT_UNITS_PERSONS.add(&models, &tx, &unit, &mut credits, true).unwrap();
    assert_eq!(credits[0].content_unit_id, unit.id);

    let roles = ContentUnitsPerson::ROLE.load(&tx, &credits).unwrap();
    assert_eq!(roles[0].as_ref().map(|r| r.name.as_str()), Some("lecturer"));
    assert_eq!(Person::CONTENT_UNITS_PERSONS.load(&tx, &[rav.clone()]).unwrap()[0], credits);

    // Credits cannot be orphaned; the role row stays untouched.
    let err = ContentUnit::CONTENT_UNITS_PERSONS
        .remove(&models, &tx, &unit, &mut credits)
        .unwrap_err();
    assert!(matches!(err, ModelError::Bind { .. }));
    assert_eq!(ContentUnitsPerson::query().count(&tx).unwrap(), 1);

    let mut names = vec![PersonI18n {
        language: "he".into(),
        name: Some("Rabbi".into()),
        ..Default::default()
    }];
    Person::I18NS.add(&models, &tx, &rav, &mut names, true).unwrap();
    let stored = PersonI18n::find(&models, &tx, rav.id, "he").unwrap();
    assert_eq!(stored.name.as_deref(), Some("Rabbi"));

    let mut publishers = vec![Publisher {
        uid: common::uid(),
        ..Default::default()
    }];
    ContentUnit::PUBLISHERS.add(&models, &tx, &unit, &mut publishers, true).unwrap();
    let loaded = Publisher::CONTENT_UNITS.load(&tx, &publishers).unwrap();
    assert_eq!(loaded[0].len(), 1);
    assert_eq!(loaded[0][0].id, unit.id);
}
