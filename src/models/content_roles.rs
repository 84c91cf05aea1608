use crate::relation::ToMany;

use super::ContentUnitsPerson;

crate::model! {
    /// The part a person plays in a unit: lecturer, translator and so on.
    pub struct ContentRole in "content_roles" {
        id: i64 = "id",
        name: String = "name",
        description: Option<String> = "description",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["name", "description"];
}

impl ContentRole {
    pub const CONTENT_UNITS_PERSONS: ToMany<ContentRole, ContentUnitsPerson> =
        ToMany::new("content_units_persons", "id", "role_id");
}
