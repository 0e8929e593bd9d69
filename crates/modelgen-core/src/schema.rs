//! The schema-to-definition mapping stage.
//!
//! Raw, driver-shaped introspection output ([`raw`]) is normalized into one
//! [`Definition`] per table by the [`Builder`]. The builder composes the type
//! mapper ([`TypeMap`]), the naming rules ([`Naming`]), key classification
//! ([`Keys`]) and the global association pass ([`Resolver`]).

mod association;
pub use association::{AssociationKind, Associations, Link, Resolver};

mod builder;
pub use builder::Builder;

mod definition;
pub use definition::{Association, Attribute, Definition, Definitions, IndexDef};

mod diagnostic;
pub use diagnostic::{CollisionKind, Diagnostic};

mod dialect;
pub use dialect::Dialect;

mod key;
pub use key::Keys;

mod name;
pub use name::Naming;

pub mod raw;
pub use raw::{ColumnMeta, RawColumn, RawForeignKey, RawIndex, RawTable, TableRef};

mod ty;
pub use ty::{LogicalType, MappedType, TypeMap, TypeParams, TypeStatus};
