use chrono::{DateTime, Utc};

use crate::relation::{ManyToMany, ToMany, ToOne};

use super::{Author, ContentUnit, SourceI18n, SourceType};

crate::model! {
    /// A node in the sources tree: collection, book, volume, part, article.
    pub struct Source in "sources" {
        id: i64 = "id",
        uid: String = "uid",
        parent_id: Option<i64> = "parent_id",
        pattern: Option<String> = "pattern",
        type_id: i64 = "type_id",
        position: Option<i32> = "position",
        name: String = "name",
        description: Option<String> = "description",
        created_at: DateTime<Utc> = "created_at",
        properties: Option<serde_json::Value> = "properties",
    }
    key(id: i64 = "id");
    defaults["id", "created_at"];
    no_defaults[
        "uid",
        "parent_id",
        "pattern",
        "type_id",
        "position",
        "name",
        "description",
        "properties",
    ];
}

impl Source {
    pub const PARENT: ToOne<Source, Source> = ToOne::new("parent", "parent_id", "id");
    pub const SOURCE_TYPE: ToOne<Source, SourceType> = ToOne::new("source_type", "type_id", "id");
    pub const CHILDREN: ToMany<Source, Source> = ToMany::new("children", "id", "parent_id");
    pub const I18NS: ToMany<Source, SourceI18n> = ToMany::new("i18ns", "id", "source_id");
    pub const AUTHORS: ManyToMany<Source, Author> =
        ManyToMany::new("authors", "authors_sources", "source_id", "author_id");
    pub const CONTENT_UNITS: ManyToMany<Source, ContentUnit> =
        ManyToMany::new("content_units", "content_units_sources", "source_id", "content_unit_id");
}
