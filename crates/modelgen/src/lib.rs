mod automate;
pub use automate::{Automate, Generated};

mod connect;
pub use connect::connect;

pub mod render;
pub use render::Sequelize;

mod snapshot;
pub use snapshot::{SnapshotFile, SnapshotIntrospector};

mod write;
pub use write::FsWriter;

pub use modelgen_core::{
    render::{FileKind, GeneratedFile, RenderOptions},
    schema,
    write::WriteOptions,
    async_trait, CodeStyle, Config, Error, Introspector, Renderer, Result, TableSelection, Writer,
};

#[cfg(feature = "sqlite")]
pub use modelgen_driver_sqlite::Sqlite;
