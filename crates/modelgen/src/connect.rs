use crate::SnapshotIntrospector;

use modelgen_core::{Error, Introspector, Result};
use std::path::PathBuf;
use url::Url;

/// Opens an introspector for `url`.
///
/// Supported schemes are `sqlite:` (with the `sqlite` feature) and
/// `snapshot:` followed by the path of a snapshot file.
pub fn connect(url: &str) -> Result<Box<dyn Introspector>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_config(format!("invalid database url `{url}`: {err}")))?;

    match parsed.scheme() {
        "sqlite" => connect_sqlite(url),
        "snapshot" => Ok(Box::new(SnapshotIntrospector::load(snapshot_path(&parsed)?)?)),
        scheme => Err(Error::invalid_config(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

/// The decoded file path of a `snapshot:` URL. Relative paths resolve
/// against the working directory.
fn snapshot_path(url: &Url) -> Result<PathBuf> {
    let invalid = || Error::invalid_config(format!("invalid snapshot path; url={url}"));

    let cwd = std::env::current_dir()?;
    let base = Url::from_directory_path(&cwd).map_err(|_| invalid())?;

    base.join(url.path())
        .map_err(|_| invalid())?
        .to_file_path()
        .map_err(|_| invalid())
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Introspector>> {
    Ok(Box::new(modelgen_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Introspector>> {
    Err(Error::invalid_config("`sqlite` feature not enabled"))
}
