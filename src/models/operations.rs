use chrono::{DateTime, Utc};

use crate::relation::{ManyToMany, ToOne};

use super::{File, OperationType, User};

crate::model! {
    /// Something done to files at a station: capture, trim, convert, send.
    pub struct Operation in "operations" {
        id: i64 = "id",
        uid: String = "uid",
        type_id: i64 = "type_id",
        created_at: DateTime<Utc> = "created_at",
        station: Option<String> = "station",
        user_id: Option<i64> = "user_id",
        details: Option<String> = "details",
        properties: Option<serde_json::Value> = "properties",
    }
    key(id: i64 = "id");
    defaults["id", "created_at"];
    no_defaults["uid", "type_id", "station", "user_id", "details", "properties"];
}

impl Operation {
    pub const OPERATION_TYPE: ToOne<Operation, OperationType> =
        ToOne::new("operation_type", "type_id", "id");
    pub const USER: ToOne<Operation, User> = ToOne::new("user", "user_id", "id");
    pub const FILES: ManyToMany<Operation, File> =
        ManyToMany::new("files", "files_operations", "operation_id", "file_id");
}
