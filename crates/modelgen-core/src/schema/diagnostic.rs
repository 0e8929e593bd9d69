use std::fmt;

/// A non-fatal finding recorded while building definitions.
///
/// Diagnostics never stop a run. Each one points at generated output that may
/// need manual follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The column type has no entry in the dialect's type map.
    UnknownType {
        table: String,
        column: String,
        raw: String,
    },

    /// The column is an enumeration whose values could not be read.
    MalformedEnum {
        table: String,
        column: String,
        raw: String,
    },

    /// A foreign key references a table outside the current table set.
    DanglingReference {
        table: String,
        column: String,
        referenced_table: String,
    },

    /// Several tables produce the same model or file name.
    NameCollision {
        kind: CollisionKind,
        name: String,
        tables: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Model,
    File,
}

impl Diagnostic {
    pub fn is_collision(&self) -> bool {
        matches!(self, Diagnostic::NameCollision { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownType { table, column, raw } => write!(
                f,
                "unrecognized type `{raw}` for column `{table}.{column}`; kept as raw type"
            ),
            Diagnostic::MalformedEnum { table, column, raw } => write!(
                f,
                "could not read enum values of `{raw}` for column `{table}.{column}`; mapped as string"
            ),
            Diagnostic::DanglingReference {
                table,
                column,
                referenced_table,
            } => write!(
                f,
                "foreign key `{table}.{column}` references table `{referenced_table}` which is not being generated"
            ),
            Diagnostic::NameCollision { kind, name, tables } => {
                let what = match kind {
                    CollisionKind::Model => "model",
                    CollisionKind::File => "file",
                };
                write!(
                    f,
                    "tables `{}` all map to {what} name `{name}`",
                    tables.join("`, `")
                )
            }
        }
    }
}
