use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::{Tag, User};

crate::model! {
    pub struct TagI18n in "tag_i18n" {
        tag_id: i64 = "tag_id",
        language: String = "language",
        original_language: Option<String> = "original_language",
        label: Option<String> = "label",
        user_id: Option<i64> = "user_id",
        created_at: DateTime<Utc> = "created_at",
    }
    key(tag_id: i64 = "tag_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["tag_id", "language", "original_language", "label", "user_id"];
}

impl TagI18n {
    pub const TAG: ToOne<TagI18n, Tag> = ToOne::new("tag", "tag_id", "id");
    pub const USER: ToOne<TagI18n, User> = ToOne::new("user", "user_id", "id");
}
