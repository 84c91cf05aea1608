use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::{Publisher, User};

crate::model! {
    pub struct PublisherI18n in "publisher_i18n" {
        publisher_id: i64 = "publisher_id",
        language: String = "language",
        original_language: Option<String> = "original_language",
        name: Option<String> = "name",
        description: Option<String> = "description",
        user_id: Option<i64> = "user_id",
        created_at: DateTime<Utc> = "created_at",
    }
    key(publisher_id: i64 = "publisher_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["publisher_id", "language", "original_language", "name", "description", "user_id"];
}

impl PublisherI18n {
    pub const PUBLISHER: ToOne<PublisherI18n, Publisher> =
        ToOne::new("publisher", "publisher_id", "id");
    pub const USER: ToOne<PublisherI18n, User> = ToOne::new("user", "user_id", "id");
}
