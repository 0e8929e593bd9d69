use modelgen_core::{
    async_trait,
    schema::{Dialect, RawColumn, RawForeignKey, RawIndex, TableRef},
    Error, Introspector, Result,
};
use rusqlite::{Connection, Params, Row};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};
use url::Url;

/// Reads table metadata from a SQLite database through its `PRAGMA`
/// table-valued functions.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

/// One row of `pragma_table_info`.
struct TableInfo {
    name: String,
    ty: String,
    not_null: bool,
    default_value: Option<String>,

    /// 1-based position in the primary key, 0 if not part of it
    pk: u32,
}

impl Sqlite {
    /// Open the database at a `sqlite:` connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::introspection)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_config(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        Ok(Self::from_connection(
            Connection::open_in_memory().map_err(Error::introspection)?,
        ))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|err| {
            Error::introspection(err).context(modelgen_core::err!(
                "opening database `{}`",
                path.display()
            ))
        })?;

        tracing::debug!(path = %path.display(), "opened sqlite database");
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves the connection usable
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn query<T>(
        &self,
        sql: &str,
        params: impl Params,
        map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let connection = self.connection();
        let mut stmt = connection.prepare(sql).map_err(Error::introspection)?;
        let rows = stmt
            .query_map(params, map)
            .map_err(Error::introspection)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(Error::introspection)
    }

    fn table_info(&self, table: &str) -> Result<Vec<TableInfo>> {
        let columns = self.table_columns(table)?;

        // `pragma_table_info` returns nothing for a missing table
        if columns.is_empty() {
            return Err(Error::table_not_found(table));
        }

        Ok(columns)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<TableInfo>> {
        self.query(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
            [table],
            |row| {
                Ok(TableInfo {
                    name: row.get(0)?,
                    ty: row.get(1)?,
                    not_null: row.get(2)?,
                    default_value: row.get(3)?,
                    pk: row.get(4)?,
                })
            },
        )
    }

    /// Primary key columns ordered by their position in the key.
    fn primary_key(columns: &[TableInfo]) -> Vec<&str> {
        let mut pk: Vec<_> = columns.iter().filter(|column| column.pk > 0).collect();
        pk.sort_by_key(|column| column.pk);
        pk.into_iter().map(|column| column.name.as_str()).collect()
    }
}

#[async_trait]
impl Introspector for Sqlite {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn list_tables(&self) -> Result<Vec<TableRef>> {
        let names = self.query(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            rusqlite::params![],
            |row| row.get::<_, String>(0),
        )?;

        Ok(names.into_iter().map(TableRef::Name).collect())
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<RawColumn>> {
        let info = self.table_info(table)?;
        let pk = Self::primary_key(&info);

        Ok(info
            .iter()
            .map(|column| {
                let mut raw = RawColumn::new(&column.name, &column.ty);
                raw.nullable = !column.not_null && column.pk == 0;
                raw.default_value = column.default_value.clone();
                raw.meta.primary_key = column.pk > 0;

                // A lone INTEGER primary key aliases the rowid
                raw.meta.auto_increment = pk.len() == 1
                    && column.pk == 1
                    && column.ty.eq_ignore_ascii_case("integer");

                raw
            })
            .collect())
    }

    async fn show_indexes(&self, table: &str) -> Result<Vec<RawIndex>> {
        let info = self.table_info(table)?;

        let listed = self.query(
            "SELECT name, \"unique\", origin FROM pragma_index_list(?1)",
            [table],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, bool>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )?;

        let mut indexes = vec![];

        for (name, unique, origin) in listed {
            let columns = self.query(
                "SELECT name FROM pragma_index_info(?1) ORDER BY seqno",
                [&name],
                |row| row.get::<_, Option<String>>(0),
            )?;

            // Expression indexes have no column names
            let Some(columns) = columns.into_iter().collect::<Option<Vec<_>>>() else {
                tracing::debug!(table, index = %name, "skipping expression index");
                continue;
            };

            indexes.push(RawIndex {
                name,
                columns,
                unique,
                primary: origin == "pk",
            });
        }

        // A rowid primary key has no index of its own
        let pk = Self::primary_key(&info);
        if !pk.is_empty() && !indexes.iter().any(|index| index.primary) {
            indexes.insert(0, RawIndex::primary(pk));
        }

        Ok(indexes)
    }

    async fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>> {
        let listed = self.query(
            "SELECT \"from\", \"table\", \"to\" FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
            [table],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )?;

        let mut foreign_keys = vec![];

        for (column, referenced_table, referenced_column) in listed {
            // `REFERENCES parent` without a column targets the parent's key
            let referenced_column = match referenced_column {
                Some(column) => column,
                None => {
                    // The parent may be missing; the reference is then dangling
                    let info = self.table_columns(&referenced_table)?;
                    Self::primary_key(&info)
                        .first()
                        .map(|column| column.to_string())
                        .unwrap_or_else(|| "rowid".to_string())
                }
            };

            foreign_keys.push(RawForeignKey::new(column, referenced_table, referenced_column));
        }

        Ok(foreign_keys)
    }
}
