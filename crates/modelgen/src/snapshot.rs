use modelgen_core::schema::{Dialect, RawColumn, RawForeignKey, RawIndex, RawTable, TableRef};
use modelgen_core::{async_trait, bail, Error, Introspector, Result};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

const SNAPSHOT_FILE_VERSION: u32 = 1;

/// A captured database schema: the raw introspection output of every table.
///
/// Snapshots are stored as TOML so that models can be regenerated without a
/// live database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    /// Snapshot file format version
    version: u32,

    pub dialect: Dialect,

    #[serde(default)]
    pub tables: Vec<RawTable>,
}

/// Serves introspection calls from a [`SnapshotFile`].
#[derive(Debug, Clone)]
pub struct SnapshotIntrospector {
    dialect: Dialect,
    tables: IndexMap<String, RawTable>,
}

impl SnapshotFile {
    pub fn new(dialect: Dialect, tables: Vec<RawTable>) -> Self {
        Self {
            version: SNAPSHOT_FILE_VERSION,
            dialect,
            tables,
        }
    }

    /// Load a snapshot file from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        contents.parse()
    }

    /// Save the snapshot file to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_toml()?)?;
        Ok(())
    }

    /// Every table name must appear once.
    fn verify(&self) -> Result<()> {
        let mut seen = IndexSet::new();

        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "snapshot lists table `{}` more than once",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| Error::from(anyhow::Error::from(err)))
    }
}

impl FromStr for SnapshotFile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let file: SnapshotFile = toml::from_str(s)?;

        if file.version != SNAPSHOT_FILE_VERSION {
            bail!(
                "unsupported snapshot file version: {}. Expected version {}",
                file.version,
                SNAPSHOT_FILE_VERSION
            );
        }

        file.verify()?;
        Ok(file)
    }
}

impl fmt::Display for SnapshotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml = self.to_toml().map_err(|_| fmt::Error)?;
        f.write_str(&toml)
    }
}

impl SnapshotIntrospector {
    /// Fails with an invalid schema error when a table name repeats.
    pub fn new(snapshot: SnapshotFile) -> Result<Self> {
        snapshot.verify()?;

        Ok(Self {
            dialect: snapshot.dialect,
            tables: snapshot
                .tables
                .into_iter()
                .map(|table| (table.name.clone(), table))
                .collect(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(SnapshotFile::load(path)?)
    }

    fn table(&self, name: &str) -> Result<&RawTable> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))
    }
}

#[async_trait]
impl Introspector for SnapshotIntrospector {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    async fn list_tables(&self) -> Result<Vec<TableRef>> {
        Ok(self.tables.keys().cloned().map(TableRef::Name).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<RawColumn>> {
        Ok(self.table(table)?.columns.clone())
    }

    async fn show_indexes(&self, table: &str) -> Result<Vec<RawIndex>> {
        Ok(self.table(table)?.indexes.clone())
    }

    async fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>> {
        Ok(self.table(table)?.foreign_keys.clone())
    }
}
