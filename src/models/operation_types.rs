use crate::relation::ToMany;

use super::Operation;

crate::model! {
    pub struct OperationType in "operation_types" {
        id: i64 = "id",
        name: String = "name",
        description: Option<String> = "description",
    }
    key(id: i64 = "id");
    defaults["id"];
    no_defaults["name", "description"];
}

impl OperationType {
    pub const OPERATIONS: ToMany<OperationType, Operation> =
        ToMany::new("operations", "id", "type_id");
}
