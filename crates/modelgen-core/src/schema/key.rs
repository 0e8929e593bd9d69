use super::{IndexDef, RawColumn, RawIndex};
use crate::{Error, Result};

use indexmap::IndexSet;
use std::collections::HashSet;

/// Primary key, unique and secondary index classification for one table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Keys {
    /// Columns belonging to the primary key, in index order
    pub primary_key: IndexSet<String>,

    /// Columns covered by a single-column unique index
    pub unique: IndexSet<String>,

    /// Non-primary indexes, deduplicated
    pub secondary: Vec<IndexDef>,
}

impl Keys {
    /// Classifies the indexes of `table`.
    ///
    /// Fails when an index is empty or names a column the table does not
    /// have, or when two primary indexes disagree on their columns.
    pub fn classify(table: &str, columns: &[RawColumn], indexes: &[RawIndex]) -> Result<Keys> {
        let known: HashSet<&str> = columns.iter().map(|column| column.name.as_str()).collect();

        let mut keys = Keys::default();
        let mut primary: Option<&RawIndex> = None;
        let mut seen = HashSet::new();

        for index in indexes {
            if index.columns.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "index `{}` on table `{table}` has no columns",
                    index.name
                )));
            }

            if let Some(column) = index.columns.iter().find(|c| !known.contains(c.as_str())) {
                return Err(Error::invalid_schema(format!(
                    "index `{}` on table `{table}` references unknown column `{column}`",
                    index.name
                )));
            }

            if index.primary {
                if let Some(first) = primary {
                    if column_set(first) != column_set(index) {
                        return Err(Error::invalid_schema(format!(
                            "table `{table}` declares conflicting primary keys `{}` and `{}`",
                            first.name, index.name
                        )));
                    }
                }
                primary = Some(index);
                keys.primary_key.extend(index.columns.iter().cloned());
                continue;
            }

            if index.unique && index.columns.len() == 1 {
                keys.unique.insert(index.columns[0].clone());
            }

            // The same index is sometimes reported more than once
            if seen.insert((column_set(index), index.unique)) {
                keys.secondary.push(IndexDef {
                    name: index.name.clone(),
                    fields: index.columns.clone(),
                    unique: index.unique,
                });
            }
        }

        Ok(keys)
    }

    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key.contains(column)
    }

    pub fn is_unique(&self, column: &str) -> bool {
        self.unique.contains(column)
    }
}

/// Union of the columns of every primary index.
pub(super) fn primary_columns(indexes: &[RawIndex]) -> IndexSet<&str> {
    indexes
        .iter()
        .filter(|index| index.primary)
        .flat_map(|index| index.columns.iter().map(String::as_str))
        .collect()
}

fn column_set(index: &RawIndex) -> Vec<&str> {
    let mut columns: Vec<_> = index.columns.iter().map(String::as_str).collect();
    columns.sort_unstable();
    columns.dedup();
    columns
}
