use crate::render::{FileKind, GeneratedFile};
use crate::{async_trait, Config, Result};

use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

/// Persists generated files.
#[async_trait]
pub trait Writer: Debug + Send + Sync + 'static {
    /// Writes `files` in order. Later files replace earlier files with the
    /// same path.
    async fn write(&self, files: &[GeneratedFile], options: &WriteOptions) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Directory for model files
    pub dir: PathBuf,

    /// Directory for type declaration files
    pub types_dir: PathBuf,

    /// Remove existing files from both directories before writing
    pub empty_dir: bool,
}

impl WriteOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            types_dir: dir.clone(),
            dir,
            empty_dir: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            dir: config.dir.clone(),
            types_dir: config.types_dir().to_path_buf(),
            empty_dir: config.empty_dir,
        }
    }

    /// The directory a file of `kind` is written to.
    pub fn dir_for(&self, kind: FileKind) -> &Path {
        match kind {
            FileKind::Model => &self.dir,
            FileKind::Types => &self.types_dir,
        }
    }
}
