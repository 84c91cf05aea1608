use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::{Person, User};

crate::model! {
    pub struct PersonI18n in "person_i18n" {
        person_id: i64 = "person_id",
        language: String = "language",
        original_language: Option<String> = "original_language",
        name: Option<String> = "name",
        description: Option<String> = "description",
        user_id: Option<i64> = "user_id",
        created_at: DateTime<Utc> = "created_at",
    }
    key(person_id: i64 = "person_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["person_id", "language", "original_language", "name", "description", "user_id"];
}

impl PersonI18n {
    pub const PERSON: ToOne<PersonI18n, Person> = ToOne::new("person", "person_id", "id");
    pub const USER: ToOne<PersonI18n, User> = ToOne::new("user", "user_id", "id");
}
