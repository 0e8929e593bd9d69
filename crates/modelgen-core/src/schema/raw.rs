//! Driver-shaped introspection output.
//!
//! These are the values an [`Introspector`](crate::Introspector) hands to the
//! mapping stage. They mirror what the database reports and carry no
//! interpretation.

use serde::{Deserialize, Serialize};

/// A table as listed by the database, before normalization.
///
/// Some drivers list plain names, others schema-qualified ones. The mapping
/// stage only ever sees the plain table name produced by
/// [`TableRef::into_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRef {
    Name(String),
    Qualified { schema: String, table: String },
}

/// A column as reported by `describe table`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColumn {
    /// Column name in the database
    pub name: String,

    /// The column type exactly as the database spells it
    #[serde(rename = "type")]
    pub raw_type: String,

    /// Whether the column accepts `NULL`
    #[serde(default)]
    pub nullable: bool,

    /// The column default, as a raw SQL expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Dialect-specific extras
    #[serde(default)]
    pub meta: ColumnMeta,
}

/// Dialect-specific column metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    /// The database generates values for this column.
    #[serde(default)]
    pub auto_increment: bool,

    /// The describe call flagged the column as part of the primary key. Key
    /// classification uses indexes, not this flag.
    #[serde(default)]
    pub primary_key: bool,

    /// Labels reported alongside the type, e.g. the values of a Postgres
    /// `USER-DEFINED` enum column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub special: Vec<String>,
}

/// An index as reported by `show index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIndex {
    pub name: String,

    /// Indexed column names, in index order
    pub columns: Vec<String>,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub primary: bool,
}

/// An outgoing foreign key reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForeignKey {
    /// The referencing column on the owning table
    pub column_name: String,

    pub referenced_table: String,

    pub referenced_column: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_name: Option<String>,
}

/// The introspection triple for one table, together with its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTable {
    pub name: String,

    #[serde(default)]
    pub columns: Vec<RawColumn>,

    #[serde(default)]
    pub indexes: Vec<RawIndex>,

    #[serde(default)]
    pub foreign_keys: Vec<RawForeignKey>,
}

impl TableRef {
    /// Normalizes the listed table to the plain table name.
    pub fn into_name(self) -> String {
        match self {
            TableRef::Name(name) => name,
            TableRef::Qualified { table, .. } => table,
        }
    }
}

impl From<&str> for TableRef {
    fn from(value: &str) -> Self {
        TableRef::Name(value.to_string())
    }
}

impl From<String> for TableRef {
    fn from(value: String) -> Self {
        TableRef::Name(value)
    }
}

impl RawColumn {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable: false,
            default_value: None,
            comment: None,
            meta: ColumnMeta::default(),
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.meta.auto_increment = true;
        self
    }

    pub fn special<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta.special = labels.into_iter().map(Into::into).collect();
        self
    }
}

impl RawIndex {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
            primary: false,
        }
    }

    /// A unique primary key index over `columns`.
    pub fn primary<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unique: true,
            primary: true,
            ..Self::new("PRIMARY", columns)
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

impl RawForeignKey {
    pub fn new(
        column_name: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            constraint_name: None,
        }
    }

    pub fn constraint_name(mut self, name: impl Into<String>) -> Self {
        self.constraint_name = Some(name.into());
        self
    }
}

impl RawTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            indexes: vec![],
            foreign_keys: vec![],
        }
    }

    pub fn column(mut self, column: RawColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: RawIndex) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn foreign_key(mut self, foreign_key: RawForeignKey) -> Self {
        self.foreign_keys.push(foreign_key);
        self
    }
}
