use chrono::{DateTime, Utc};

use crate::relation::{ManyToMany, ToMany};

use super::{AuthorI18n, Source};

crate::model! {
    pub struct Author in "authors" {
        id: i64 = "id",
        code: String = "code",
        name: String = "name",
        full_name: Option<String> = "full_name",
        created_at: DateTime<Utc> = "created_at",
    }
    key(id: i64 = "id");
    defaults["id", "created_at"];
    no_defaults["code", "name", "full_name"];
}

impl Author {
    pub const I18NS: ToMany<Author, AuthorI18n> = ToMany::new("i18ns", "id", "author_id");
    pub const SOURCES: ManyToMany<Author, Source> =
        ManyToMany::new("sources", "authors_sources", "author_id", "source_id");
}
