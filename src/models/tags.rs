use crate::relation::{ManyToMany, ToMany, ToOne};

use super::{ContentUnit, TagI18n};

crate::model! {
    /// A topic in the tags tree.
    pub struct Tag in "tags" {
        id: i64 = "id",
        uid: String = "uid",
        pattern: Option<String> = "pattern",
        parent_id: Option<i64> = "parent_id",
        description: Option<String> = "description",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["uid", "pattern", "parent_id", "description"];
}

impl Tag {
    pub const PARENT: ToOne<Tag, Tag> = ToOne::new("parent", "parent_id", "id");
    pub const CHILDREN: ToMany<Tag, Tag> = ToMany::new("children", "id", "parent_id");
    pub const I18NS: ToMany<Tag, TagI18n> = ToMany::new("i18ns", "id", "tag_id");
    pub const CONTENT_UNITS: ManyToMany<Tag, ContentUnit> =
        ManyToMany::new("content_units", "content_units_tags", "tag_id", "content_unit_id");
}
