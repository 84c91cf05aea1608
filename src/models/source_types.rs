use crate::relation::ToMany;

use super::Source;

crate::model! {
    pub struct SourceType in "source_types" {
        id: i64 = "id",
        name: String = "name",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["name"];
}

impl SourceType {
    pub const SOURCES: ToMany<SourceType, Source> = ToMany::new("sources", "id", "type_id");
}
