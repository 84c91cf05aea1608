use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::{Collection, User};

crate::model! {
    pub struct CollectionI18n in "collection_i18n" {
        collection_id: i64 = "collection_id",
        language: String = "language",
        original_language: Option<String> = "original_language",
        name: Option<String> = "name",
        description: Option<String> = "description",
        user_id: Option<i64> = "user_id",
        created_at: DateTime<Utc> = "created_at",
    }
    key(collection_id: i64 = "collection_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["collection_id", "language", "original_language", "name", "description", "user_id"];
}

impl CollectionI18n {
    pub const COLLECTION: ToOne<CollectionI18n, Collection> =
        ToOne::new("collection", "collection_id", "id");
    pub const USER: ToOne<CollectionI18n, User> = ToOne::new("user", "user_id", "id");
}
