//! Shared setup for the database tests.
//!
//! Tests run only when `TEST_DATABASE_URL` points at a PostgreSQL server.
//! Each test opens a transaction, creates the schema as temporary tables
//! inside it and never commits, so nothing outlives the test.
#![allow(dead_code)]

use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;

use mdb_models::models::{Author, ContentType, ContentUnit, File, Source, SourceType, Tag};
use mdb_models::{connect, Columns, Executor, Models, PgExecutor, Transaction};

const SCHEMA: &str = include_str!("../schema.sql");

pub struct TestDatabase {
    executor: PgExecutor,
}

impl TestDatabase {
    /// Connect to `TEST_DATABASE_URL`, or `None` when it is not set.
    pub fn connect() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL is not set, skipping database test");
                return None;
            }
        };
        let client = connect(&url).expect("Failed to connect to test database");
        Some(Self {
            executor: PgExecutor::new(client),
        })
    }

    pub fn url() -> Option<String> {
        std::env::var("TEST_DATABASE_URL").ok()
    }

    /// A transaction holding a fresh copy of the schema. Dropping it rolls everything back.
    pub fn begin(&self) -> Transaction {
        let tx = self.executor.begin().expect("Failed to begin transaction");
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            tx.execute(statement, &[]).expect("Failed to create schema");
        }
        tx
    }
}

/// Eight character uid, unique enough for a test run.
pub fn uid() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

pub fn random_author() -> Author {
    let code: String = (0..3)
        .map(|_| rand::thread_rng().gen_range(b'a'..=b'z') as char)
        .collect();
    Author {
        code,
        name: Name().fake(),
        full_name: Some(Name().fake()),
        ..Default::default()
    }
}

pub fn insert_source_type<E: Executor>(models: &Models, exec: &E) -> SourceType {
    let mut source_type = SourceType {
        name: Word().fake(),
        ..Default::default()
    };
    models
        .insert(exec, &mut source_type, Columns::Infer)
        .expect("Failed to insert source type");
    source_type
}

pub fn random_source(type_id: i64) -> Source {
    Source {
        uid: uid(),
        type_id,
        name: Sentence(2..4).fake(),
        position: Some(rand::thread_rng().gen_range(1..100)),
        ..Default::default()
    }
}

pub fn insert_sources<E: Executor>(models: &Models, exec: &E, count: usize) -> Vec<Source> {
    let source_type = insert_source_type(models, exec);
    (0..count)
        .map(|_| {
            let mut source = random_source(source_type.id);
            models
                .insert(exec, &mut source, Columns::Infer)
                .expect("Failed to insert source");
            source
        })
        .collect()
}

pub fn insert_content_unit<E: Executor>(models: &Models, exec: &E) -> ContentUnit {
    let mut content_type = ContentType {
        name: uid(),
        ..Default::default()
    };
    models
        .insert(exec, &mut content_type, Columns::Infer)
        .expect("Failed to insert content type");
    let mut unit = ContentUnit {
        uid: uid(),
        type_id: content_type.id,
        properties: Some(serde_json::json!({ "duration": rand::thread_rng().gen_range(60..7200) })),
        ..Default::default()
    };
    models
        .insert(exec, &mut unit, Columns::Infer)
        .expect("Failed to insert content unit");
    unit
}

pub fn random_file() -> File {
    File {
        uid: uid(),
        name: format!("{}.mp4", Word().fake::<String>()),
        size: rand::thread_rng().gen_range(1..1_000_000_000),
        r#type: "video".into(),
        sub_type: String::new(),
        ..Default::default()
    }
}

pub fn random_tag() -> Tag {
    Tag {
        uid: uid(),
        description: Some(Sentence(3..6).fake()),
        ..Default::default()
    }
}
