use crate::relation::ToMany;

use super::{ContentUnitsPerson, PersonI18n};

crate::model! {
    /// A lecturer or other person credited on content units.
    pub struct Person in "persons" {
        id: i64 = "id",
        uid: String = "uid",
        pattern: Option<String> = "pattern",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["uid", "pattern"];
}

impl Person {
    pub const I18NS: ToMany<Person, PersonI18n> = ToMany::new("i18ns", "id", "person_id");
    pub const CONTENT_UNITS_PERSONS: ToMany<Person, ContentUnitsPerson> =
        ToMany::new("content_units_persons", "id", "person_id");
}
