use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::{ContentUnit, User};

crate::model! {
    pub struct ContentUnitI18n in "content_unit_i18n" {
        content_unit_id: i64 = "content_unit_id",
        language: String = "language",
        original_language: Option<String> = "original_language",
        name: Option<String> = "name",
        description: Option<String> = "description",
        user_id: Option<i64> = "user_id",
        created_at: DateTime<Utc> = "created_at",
    }
    key(content_unit_id: i64 = "content_unit_id", language: &str = "language");
    defaults["created_at"];
    no_defaults[
        "content_unit_id",
        "language",
        "original_language",
        "name",
        "description",
        "user_id",
    ];
}

impl ContentUnitI18n {
    pub const CONTENT_UNIT: ToOne<ContentUnitI18n, ContentUnit> =
        ToOne::new("content_unit", "content_unit_id", "id");
    pub const USER: ToOne<ContentUnitI18n, User> = ToOne::new("user", "user_id", "id");
}
