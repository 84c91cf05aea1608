use chrono::{DateTime, Utc};

use crate::relation::{ToMany, ToOne};

use super::{CollectionI18n, CollectionsContentUnit, ContentType};

crate::model! {
    /// An ordered group of content units: a congress, a lesson series.
    pub struct Collection in "collections" {
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

impl Collection {
    pub const CONTENT_TYPE: ToOne<Collection, ContentType> =
        ToOne::new("content_type", "type_id", "id");
    pub const I18NS: ToMany<Collection, CollectionI18n> =
        ToMany::new("i18ns", "id", "collection_id");
    pub const COLLECTIONS_CONTENT_UNITS: ToMany<Collection, CollectionsContentUnit> =
        ToMany::new("collections_content_units", "id", "collection_id");
}
