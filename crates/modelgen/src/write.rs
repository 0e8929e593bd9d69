use modelgen_core::render::GeneratedFile;
use modelgen_core::write::WriteOptions;
use modelgen_core::{async_trait, Result, Writer};

use indexmap::IndexSet;
use std::path::Path;

/// Writes generated files to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FsWriter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Writer for FsWriter {
    async fn write(&self, files: &[GeneratedFile], options: &WriteOptions) -> Result<()> {
        let dirs: IndexSet<&Path> = [options.dir.as_path(), options.types_dir.as_path()]
            .into_iter()
            .collect();

        for dir in &dirs {
            if options.empty_dir {
                empty_dir(dir).await?;
            }
            tokio::fs::create_dir_all(dir).await?;
        }

        for file in files {
            let path = options.dir_for(file.kind).join(&file.file_name);
            tracing::debug!(path = %path.display(), "writing model file");
            tokio::fs::write(&path, &file.contents).await?;
        }

        Ok(())
    }
}

/// Removes everything inside `dir`, keeping the directory itself.
async fn empty_dir(dir: &Path) -> Result<()> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            tokio::fs::remove_dir_all(&path).await?;
        } else {
            tokio::fs::remove_file(&path).await?;
        }
    }

    tracing::debug!(dir = %dir.display(), "emptied output directory");
    Ok(())
}
