use crate::relation::ToOne;

use super::{ContentRole, ContentUnit, Person};

crate::model! {
    /// A person credited on a unit, in some role.
    pub struct ContentUnitsPerson in "content_units_persons" {
        content_unit_id: i64 = "content_unit_id",
        person_id: i64 = "person_id",
        role_id: i64 = "role_id",
    }
    key(content_unit_id: i64 = "content_unit_id", person_id: i64 = "person_id");
    defaults[];
    no_defaults["content_unit_id", "person_id", "role_id"];
}

impl ContentUnitsPerson {
    pub const CONTENT_UNIT: ToOne<ContentUnitsPerson, ContentUnit> =
        ToOne::new("content_unit", "content_unit_id", "id");
    pub const PERSON: ToOne<ContentUnitsPerson, Person> = ToOne::new("person", "person_id", "id");
    pub const ROLE: ToOne<ContentUnitsPerson, ContentRole> = ToOne::new("role", "role_id", "id");
}
