use crate::schema::{Dialect, RawColumn, RawForeignKey, RawIndex, TableRef};
use crate::{async_trait, Result};

use std::fmt::Debug;

/// Reads table metadata from a database.
///
/// Implementations return the driver's raw view of the schema. All
/// normalization happens in [`crate::schema::Builder`], so drivers should
/// report what the database says and nothing more.
#[async_trait]
pub trait Introspector: Debug + Send + Sync + 'static {
    /// The SQL dialect of the database.
    fn dialect(&self) -> Dialect;

    /// Every table in the database, in the order the database lists them.
    async fn list_tables(&self) -> Result<Vec<TableRef>>;

    /// Columns of `table`, in declaration order.
    async fn describe_table(&self, table: &str) -> Result<Vec<RawColumn>>;

    /// Indexes of `table`, including the primary key.
    async fn show_indexes(&self, table: &str) -> Result<Vec<RawIndex>>;

    async fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>>;
}
