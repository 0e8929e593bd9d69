use super::{key, RawForeignKey, RawTable};

use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssociationKind {
    /// The owning table holds a foreign key to the target.
    BelongsTo,

    /// The target holds a foreign key to the owning table.
    HasMany,

    /// Both tables are referenced by a junction table.
    BelongsToMany,
}

/// A relationship between two tables, before model names are assigned.
///
/// Links are ordered by kind, then target table, then foreign key, which gives
/// every table a deterministic association order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    pub kind: AssociationKind,

    /// The other side of the relationship
    pub target_table: String,

    /// The foreign key column. It lives on the owning table for `BelongsTo`,
    /// on the target for `HasMany` and on the junction table for
    /// `BelongsToMany`.
    pub foreign_key: String,

    /// The referenced column
    pub target_key: String,

    /// Junction table column referencing the target (`BelongsToMany` only)
    pub other_key: Option<String>,

    /// Junction table (`BelongsToMany` only)
    pub through: Option<String>,

    pub constraint_name: Option<String>,

    /// The target table is not part of the current table set.
    pub dangling: bool,
}

/// Resolves associations across the whole table set.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    many_to_many: bool,
}

/// Associations of every table, produced by [`Resolver::resolve`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Associations {
    by_table: IndexMap<String, Vec<Link>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also infer `BelongsToMany` through junction tables.
    pub fn many_to_many(mut self, enabled: bool) -> Self {
        self.many_to_many = enabled;
        self
    }

    /// Resolves the associations of every table in `tables`.
    ///
    /// A table's `HasMany` side depends on the foreign keys of every other
    /// table, so all outgoing references are collected before any table's
    /// set is final.
    pub fn resolve(&self, tables: &[RawTable]) -> Associations {
        let names: IndexSet<&str> = tables.iter().map(|table| table.name.as_str()).collect();

        let mut links: IndexMap<&str, BTreeSet<Link>> = names
            .iter()
            .map(|name| (*name, BTreeSet::new()))
            .collect();

        // Outgoing references
        for table in tables {
            for fk in &table.foreign_keys {
                let dangling = !names.contains(fk.referenced_table.as_str());

                insert(
                    &mut links,
                    &table.name,
                    Link {
                        kind: AssociationKind::BelongsTo,
                        target_table: fk.referenced_table.clone(),
                        foreign_key: fk.column_name.clone(),
                        target_key: fk.referenced_column.clone(),
                        other_key: None,
                        through: None,
                        constraint_name: fk.constraint_name.clone(),
                        dangling,
                    },
                );
            }
        }

        // Complements on the referenced side. A dangling target has no
        // definition to carry them.
        for table in tables {
            for fk in &table.foreign_keys {
                if !names.contains(fk.referenced_table.as_str()) {
                    continue;
                }

                insert(
                    &mut links,
                    &fk.referenced_table,
                    Link {
                        kind: AssociationKind::HasMany,
                        target_table: table.name.clone(),
                        foreign_key: fk.column_name.clone(),
                        target_key: fk.referenced_column.clone(),
                        other_key: None,
                        through: None,
                        constraint_name: fk.constraint_name.clone(),
                        dangling: false,
                    },
                );
            }
        }

        if self.many_to_many {
            for table in tables {
                let Some([left, right]) = junction(table, &names) else {
                    continue;
                };

                for (source, target) in [(left, right), (right, left)] {
                    insert(
                        &mut links,
                        &source.referenced_table,
                        Link {
                            kind: AssociationKind::BelongsToMany,
                            target_table: target.referenced_table.clone(),
                            foreign_key: source.column_name.clone(),
                            target_key: source.referenced_column.clone(),
                            other_key: Some(target.column_name.clone()),
                            through: Some(table.name.clone()),
                            constraint_name: None,
                            dangling: false,
                        },
                    );
                }
            }
        }

        Associations {
            by_table: links
                .into_iter()
                .map(|(table, links)| (table.to_string(), links.into_iter().collect()))
                .collect(),
        }
    }
}

impl Associations {
    /// Resolves `tables` with the default resolver.
    pub fn resolve(tables: &[RawTable]) -> Associations {
        Resolver::new().resolve(tables)
    }

    /// The associations owned by `table`, empty for unknown tables.
    pub fn for_table(&self, table: &str) -> &[Link] {
        self.by_table.get(table).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Link)> {
        self.by_table
            .iter()
            .flat_map(|(table, links)| links.iter().map(move |link| (table.as_str(), link)))
    }
}

fn insert(links: &mut IndexMap<&str, BTreeSet<Link>>, table: &str, link: Link) {
    if let Some(set) = links.get_mut(table) {
        set.insert(link);
    }
}

/// Returns the two foreign keys of `table` when it is a junction table: it
/// references exactly two distinct in-set tables other than itself, and its
/// primary key is made of those foreign key columns.
fn junction<'a>(table: &'a RawTable, names: &IndexSet<&str>) -> Option<[&'a RawForeignKey; 2]> {
    let [left, right] = table.foreign_keys.as_slice() else {
        return None;
    };

    let targets_ok = left.referenced_table != right.referenced_table
        && [left, right].iter().all(|fk| {
            fk.referenced_table != table.name && names.contains(fk.referenced_table.as_str())
        });

    if !targets_ok {
        return None;
    }

    let primary_key = key::primary_columns(&table.indexes);

    let keyed_by_references = !primary_key.is_empty()
        && primary_key
            .iter()
            .all(|column| *column == left.column_name || *column == right.column_name);

    keyed_by_references.then_some([left, right])
}
