use super::{
    Association, Associations, Attribute, CollisionKind, Definition, Definitions, Diagnostic,
    Dialect, Keys, Link, Naming, RawTable, Resolver, TypeMap, TypeStatus,
};
use crate::{Config, Error, Result};

use indexmap::{IndexMap, IndexSet};

/// Builds [`Definitions`] from raw introspection output.
///
/// The builder is a pure function of its inputs: the same tables and options
/// always produce the same definitions, in the same order.
#[derive(Debug, Clone)]
pub struct Builder {
    naming: Naming,
    type_map: TypeMap,
    resolver: Resolver,
}

/// Used to track state during the build process
struct BuildDefinitions<'a> {
    builder: &'a Builder,

    /// Resolved once for the whole table set
    associations: Associations,

    /// Model name of every table being built
    model_names: IndexMap<&'a str, String>,

    definitions: IndexMap<String, Definition>,

    diagnostics: Vec<Diagnostic>,
}

impl Builder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            naming: Naming::default(),
            type_map: TypeMap::for_dialect(dialect),
            resolver: Resolver::new(),
        }
    }

    /// A builder configured from `config`. The configured dialect, if any,
    /// takes precedence over `dialect`.
    pub fn from_config(config: &Config, dialect: Dialect) -> Self {
        Self {
            naming: config.naming(),
            type_map: config.type_map(dialect),
            resolver: Resolver::new().many_to_many(config.infer_many_to_many),
        }
    }

    pub fn naming(&mut self, naming: Naming) -> &mut Self {
        self.naming = naming;
        self
    }

    pub fn type_map(&mut self, type_map: TypeMap) -> &mut Self {
        self.type_map = type_map;
        self
    }

    pub fn resolver(&mut self, resolver: Resolver) -> &mut Self {
        self.resolver = resolver;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.type_map.dialect()
    }

    /// Builds one definition per table, in input order.
    ///
    /// Fails on structurally invalid input: duplicate table names, or indexes
    /// that cannot be classified. Everything else degrades and is reported
    /// through [`Definitions::diagnostics`].
    pub fn build(&self, tables: &[RawTable]) -> Result<Definitions> {
        let mut seen = IndexSet::new();
        for table in tables {
            if !seen.insert(table.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "table `{}` appears more than once",
                    table.name
                )));
            }
        }

        let mut build = BuildDefinitions {
            builder: self,
            associations: self.resolver.resolve(tables),
            model_names: tables
                .iter()
                .map(|table| (table.name.as_str(), self.naming.model_name(&table.name)))
                .collect(),
            definitions: IndexMap::with_capacity(tables.len()),
            diagnostics: vec![],
        };

        for table in tables {
            let definition = build.build_definition(table)?;

            build.definitions.insert(table.name.clone(), definition);
        }

        build.record_dangling_references();
        build.detect_collisions();

        tracing::debug!(
            dialect = %self.dialect(),
            tables = build.definitions.len(),
            diagnostics = build.diagnostics.len(),
            "built model definitions"
        );

        Ok(Definitions {
            definitions: build.definitions,
            diagnostics: build.diagnostics,
        })
    }
}

impl BuildDefinitions<'_> {
    fn build_definition(&mut self, table: &RawTable) -> Result<Definition> {
        let keys = Keys::classify(&table.name, &table.columns, &table.indexes)?;
        let builder = self.builder;
        let naming = &builder.naming;

        let mut attributes = Vec::with_capacity(table.columns.len());

        for column in &table.columns {
            let ty = builder.type_map.map(&column.raw_type, &column.meta);

            match ty.status {
                TypeStatus::Recognized => {}
                TypeStatus::Unrecognized => {
                    tracing::warn!(
                        table = %table.name,
                        column = %column.name,
                        raw = %column.raw_type,
                        "unrecognized column type"
                    );
                    self.diagnostics.push(Diagnostic::UnknownType {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        raw: column.raw_type.clone(),
                    });
                }
                TypeStatus::MalformedEnum => {
                    tracing::warn!(
                        table = %table.name,
                        column = %column.name,
                        raw = %column.raw_type,
                        "malformed enum type"
                    );
                    self.diagnostics.push(Diagnostic::MalformedEnum {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        raw: column.raw_type.clone(),
                    });
                }
            }

            attributes.push(Attribute {
                name: naming.attr_name(&column.name),
                column: column.name.clone(),
                ty,
                nullable: column.nullable,
                primary_key: keys.is_primary_key(&column.name),
                unique: keys.is_unique(&column.name),
                auto_increment: column.meta.auto_increment,
                default_value: column.default_value.clone(),
                comment: column.comment.clone(),
            });
        }

        let associations = self
            .associations
            .for_table(&table.name)
            .iter()
            .map(|link| self.build_association(&table.name, link))
            .collect();

        let model_name = self.model_name(&table.name);
        let file_name = naming.file_name(&model_name, &table.name);

        Ok(Definition {
            table_name: table.name.clone(),
            model_name,
            file_name,
            attributes,
            associations,
            indexes: keys.secondary,
        })
    }

    fn build_association(&self, table: &str, link: &Link) -> Association {
        if link.dangling {
            tracing::warn!(
                table,
                column = %link.foreign_key,
                referenced_table = %link.target_table,
                "foreign key references a table outside the current set"
            );
        }

        let naming = &self.builder.naming;

        Association {
            kind: link.kind,
            target_table: link.target_table.clone(),
            target_model: self.model_name(&link.target_table),
            foreign_key: link.foreign_key.clone(),
            foreign_key_attr: naming.attr_name(&link.foreign_key),
            target_key: link.target_key.clone(),
            target_key_attr: naming.attr_name(&link.target_key),
            other_key: link.other_key.clone(),
            other_key_attr: link.other_key.as_deref().map(|key| naming.attr_name(key)),
            through: link.through.clone(),
            dangling: link.dangling,
        }
    }

    /// Dangling targets keep their raw table name.
    fn model_name(&self, table: &str) -> String {
        self.model_names
            .get(table)
            .cloned()
            .unwrap_or_else(|| table.to_string())
    }

    fn record_dangling_references(&mut self) {
        for definition in self.definitions.values() {
            for association in &definition.associations {
                if association.dangling {
                    self.diagnostics.push(Diagnostic::DanglingReference {
                        table: definition.table_name.clone(),
                        column: association.foreign_key.clone(),
                        referenced_table: association.target_table.clone(),
                    });
                }
            }
        }
    }

    fn detect_collisions(&mut self) {
        for kind in [CollisionKind::Model, CollisionKind::File] {
            let mut by_name: IndexMap<&str, Vec<String>> = IndexMap::new();

            for definition in self.definitions.values() {
                let name = match kind {
                    CollisionKind::Model => definition.model_name.as_str(),
                    CollisionKind::File => definition.file_name.as_str(),
                };
                by_name
                    .entry(name)
                    .or_default()
                    .push(definition.table_name.clone());
            }

            for (name, tables) in by_name {
                if tables.len() < 2 {
                    continue;
                }

                tracing::warn!(?kind, name, ?tables, "generated name collision");

                self.diagnostics.push(Diagnostic::NameCollision {
                    kind,
                    name: name.to_string(),
                    tables,
                });
            }
        }
    }
}
