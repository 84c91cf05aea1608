//! Models of the MDB archive schema.
//!
//! One module per table. Join tables have no model of their own; they are
//! reached through the [`ManyToMany`](crate::relation::ManyToMany) descriptors
//! on either side.

mod author_i18n;
mod authors;
mod collection_i18n;
mod collections;
mod collections_content_units;
mod content_roles;
mod content_types;
mod content_unit_i18n;
mod content_units;
mod content_units_persons;
mod files;
mod operation_types;
mod operations;
mod person_i18n;
mod persons;
mod publisher_i18n;
mod publishers;
mod source_i18n;
mod source_types;
mod sources;
mod tag_i18n;
mod tags;
mod users;

pub use author_i18n::AuthorI18n;
pub use authors::Author;
pub use collection_i18n::CollectionI18n;
pub use collections::Collection;
pub use collections_content_units::CollectionsContentUnit;
pub use content_roles::ContentRole;
pub use content_types::ContentType;
pub use content_unit_i18n::ContentUnitI18n;
pub use content_units::ContentUnit;
pub use content_units_persons::ContentUnitsPerson;
pub use files::File;
pub use operation_types::OperationType;
pub use operations::Operation;
pub use person_i18n::PersonI18n;
pub use persons::Person;
pub use publisher_i18n::PublisherI18n;
pub use publishers::Publisher;
pub use source_i18n::SourceI18n;
pub use source_types::SourceType;
pub use sources::Source;
pub use tag_i18n::TagI18n;
pub use tags::Tag;
pub use users::User;
