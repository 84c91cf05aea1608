use crate::relation::ToOne;

use super::{Collection, ContentUnit};

crate::model! {
    /// Membership of a unit in a collection, with its display name there.
    pub struct CollectionsContentUnit in "collections_content_units" {
        collection_id: i64 = "collection_id",
        content_unit_id: i64 = "content_unit_id",
        name: String = "name",
    }
    key(collection_id: i64 = "collection_id", content_unit_id: i64 = "content_unit_id");
    defaults[];
    no_defaults["collection_id", "content_unit_id", "name"];
}

impl CollectionsContentUnit {
    pub const COLLECTION: ToOne<CollectionsContentUnit, Collection> =
        ToOne::new("collection", "collection_id", "id");
    pub const CONTENT_UNIT: ToOne<CollectionsContentUnit, ContentUnit> =
        ToOne::new("content_unit", "content_unit_id", "id");
}
