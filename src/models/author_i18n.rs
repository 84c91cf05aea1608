use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::Author;

crate::model! {
    pub struct AuthorI18n in "author_i18n" {
        author_id: i64 = "author_id",
        language: String = "language",
        name: Option<String> = "name",
        full_name: Option<String> = "full_name",
        created_at: DateTime<Utc> = "created_at",
    }
    key(author_id: i64 = "author_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["author_id", "language", "name", "full_name"];
}

impl AuthorI18n {
    pub const AUTHOR: ToOne<AuthorI18n, Author> = ToOne::new("author", "author_id", "id");
}
