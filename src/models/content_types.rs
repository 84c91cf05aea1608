use crate::relation::ToMany;

use super::{Collection, ContentUnit};

crate::model! {
    pub struct ContentType in "content_types" {
        id: i64 = "id",
        name: String = "name",
        description: Option<String> = "description",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["name", "description"];
}

impl ContentType {
    pub const CONTENT_UNITS: ToMany<ContentType, ContentUnit> =
        ToMany::new("content_units", "id", "type_id");
    pub const COLLECTIONS: ToMany<ContentType, Collection> =
        ToMany::new("collections", "id", "type_id");
}
