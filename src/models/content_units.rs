use chrono::{DateTime, Utc};

use crate::relation::{ManyToMany, ToMany, ToOne};

use super::{
    CollectionsContentUnit, ContentType, ContentUnitI18n, ContentUnitsPerson, File, Publisher,
    Source, Tag,
};

crate::model! {
    /// A lesson, program, clip or any other unit of published content.
    pub struct ContentUnit in "content_units" {
        id: i64 = "id",
        uid: String = "uid",
        type_id: i64 = "type_id",
        created_at: DateTime<Utc> = "created_at",
        properties: Option<serde_json::Value> = "properties",
        secure: i16 = "secure",
        published: bool = "published",
    }
    key(id: i64 = "id");
    defaults["id", "created_at", "secure", "published"];
    no_defaults["uid", "type_id", "properties"];
}

impl ContentUnit {
    pub const CONTENT_TYPE: ToOne<ContentUnit, ContentType> =
        ToOne::new("content_type", "type_id", "id");
    pub const I18NS: ToMany<ContentUnit, ContentUnitI18n> =
        ToMany::new("i18ns", "id", "content_unit_id");
    pub const FILES: ToMany<ContentUnit, File> = ToMany::new("files", "id", "content_unit_id");
    pub const COLLECTIONS_CONTENT_UNITS: ToMany<ContentUnit, CollectionsContentUnit> =
        ToMany::new("collections_content_units", "id", "content_unit_id");
    pub const CONTENT_UNITS_PERSONS: ToMany<ContentUnit, ContentUnitsPerson> =
        ToMany::new("content_units_persons", "id", "content_unit_id");
    pub const SOURCES: ManyToMany<ContentUnit, Source> =
        ManyToMany::new("sources", "content_units_sources", "content_unit_id", "source_id");
    pub const TAGS: ManyToMany<ContentUnit, Tag> =
        ManyToMany::new("tags", "content_units_tags", "content_unit_id", "tag_id");
    pub const PUBLISHERS: ManyToMany<ContentUnit, Publisher> = ManyToMany::new(
        "publishers",
        "content_units_publishers",
        "content_unit_id",
        "publisher_id",
    );
}
