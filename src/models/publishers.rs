use crate::relation::{ManyToMany, ToMany};

use super::{ContentUnit, PublisherI18n};

crate::model! {
    /// A publishing house of printed material in the archive.
    pub struct Publisher in "publishers" {
        id: i64 = "id",
        uid: String = "uid",
        pattern: Option<String> = "pattern",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["uid", "pattern"];
}

impl Publisher {
    pub const I18NS: ToMany<Publisher, PublisherI18n> = ToMany::new("i18ns", "id", "publisher_id");
    pub const CONTENT_UNITS: ManyToMany<Publisher, ContentUnit> = ManyToMany::new(
        "content_units",
        "content_units_publishers",
        "publisher_id",
        "content_unit_id",
    );
}
