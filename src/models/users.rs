use chrono::{DateTime, Utc};

use crate::relation::ToMany;

use super::{CollectionI18n, ContentUnitI18n, Operation, PersonI18n, PublisherI18n, TagI18n};

crate::model! {
    /// An archive operator. Operations and translations record who made them.
    pub struct User in "users" {
        id: i64 = "id",
        email: String = "email",
        name: Option<String> = "name",
        phone: Option<String> = "phone",
        comments: Option<String> = "comments",
        created_at: DateTime<Utc> = "created_at",
        updated_at: Option<DateTime<Utc>> = "updated_at",
        deleted_at: Option<DateTime<Utc>> = "deleted_at",
    }
    key(id: i64 = "id");
    defaults["id", "created_at"];
    no_defaults["email", "name", "phone", "comments", "updated_at", "deleted_at"];
}

impl User {
    pub const OPERATIONS: ToMany<User, Operation> = ToMany::new("operations", "id", "user_id");
    pub const CONTENT_UNIT_I18NS: ToMany<User, ContentUnitI18n> =
        ToMany::new("content_unit_i18ns", "id", "user_id");
    pub const COLLECTION_I18NS: ToMany<User, CollectionI18n> =
        ToMany::new("collection_i18ns", "id", "user_id");
    pub const TAG_I18NS: ToMany<User, TagI18n> = ToMany::new("tag_i18ns", "id", "user_id");
    pub const PERSON_I18NS: ToMany<User, PersonI18n> = ToMany::new("person_i18ns", "id", "user_id");
    pub const PUBLISHER_I18NS: ToMany<User, PublisherI18n> =
        ToMany::new("publisher_i18ns", "id", "user_id");
}
