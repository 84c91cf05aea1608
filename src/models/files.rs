use chrono::{DateTime, Utc};

use crate::relation::{ManyToMany, ToMany, ToOne};

use super::{ContentUnit, Operation};

crate::model! {
    /// A physical file. Derived files point at their source through `parent_id`.
    pub struct File in "files" {
        id: i64 = "id",
        uid: String = "uid",
        name: String = "name",
        size: i64 = "size",
        r#type: String = "type",
        sub_type: String = "sub_type",
        mime_type: Option<String> = "mime_type",
        sha1: Option<Vec<u8>> = "sha1",
        content_unit_id: Option<i64> = "content_unit_id",
        created_at: DateTime<Utc> = "created_at",
        language: Option<String> = "language",
        backup_count: Option<i16> = "backup_count",
        first_backup_time: Option<DateTime<Utc>> = "first_backup_time",
        properties: Option<serde_json::Value> = "properties",
        parent_id: Option<i64> = "parent_id",
    }
    key(id: i64 = "id");
    defaults["id", "created_at", "backup_count"];
    no_defaults[
        "uid", "name", "size", "type", "sub_type", "mime_type", "sha1", "content_unit_id",
        "language", "first_backup_time", "properties", "parent_id"
    ];
}

impl File {
    pub const CONTENT_UNIT: ToOne<File, ContentUnit> =
        ToOne::new("content_unit", "content_unit_id", "id");
    pub const PARENT: ToOne<File, File> = ToOne::new("parent", "parent_id", "id");
    pub const CHILDREN: ToMany<File, File> = ToMany::new("children", "id", "parent_id");
    pub const OPERATIONS: ManyToMany<File, Operation> =
        ManyToMany::new("operations", "files_operations", "file_id", "operation_id");
}
