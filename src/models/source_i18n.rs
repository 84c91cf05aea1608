use chrono::{DateTime, Utc};

use crate::relation::ToOne;

use super::Source;

crate::model! {
    pub struct SourceI18n in "source_i18n" {
        source_id: i64 = "source_id",
        language: String = "language",
        name: Option<String> = "name",
        description: Option<String> = "description",
        created_at: DateTime<Utc> = "created_at",
    }
    key(source_id: i64 = "source_id", language: &str = "language");
    defaults["created_at"];
    no_defaults["source_id", "language", "name", "description"];
}

impl SourceI18n {
    pub const SOURCE: ToOne<SourceI18n, Source> = ToOne::new("source", "source_id", "id");
}
