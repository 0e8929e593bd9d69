mod config;
pub use config::{CodeStyle, Config, TableSelection};

pub mod driver;
pub use driver::Introspector;

mod error;
pub use error::{Error, IntoError};

pub mod render;
pub use render::Renderer;

pub mod schema;

pub mod write;
pub use write::Writer;

/// A Result type alias that uses modelgen's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
