use super::{AssociationKind, Diagnostic, MappedType};

use indexmap::IndexMap;

/// The normalized, dialect-independent description of one table as a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub table_name: String,

    pub model_name: String,

    /// File name without extension
    pub file_name: String,

    /// One attribute per column, in column order
    pub attributes: Vec<Attribute>,

    pub associations: Vec<Association>,

    /// Non-primary indexes
    pub indexes: Vec<IndexDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// The attribute name in generated code
    pub name: String,

    /// The column name in the database
    pub column: String,

    pub ty: MappedType,

    pub nullable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    /// True if a single-column unique index covers the column
    pub unique: bool,

    pub auto_increment: bool,

    pub default_value: Option<String>,

    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub kind: AssociationKind,

    pub target_table: String,

    /// Model name of the target, or the raw table name when the target is
    /// not part of this run
    pub target_model: String,

    /// Foreign key column
    pub foreign_key: String,

    /// Foreign key column, as an attribute name
    pub foreign_key_attr: String,

    /// Referenced column
    pub target_key: String,

    /// Referenced column, as an attribute name
    pub target_key_attr: String,

    /// Junction column referencing the target (`BelongsToMany` only)
    pub other_key: Option<String>,

    /// Junction column referencing the target, as an attribute name
    pub other_key_attr: Option<String>,

    /// Junction table (`BelongsToMany` only)
    pub through: Option<String>,

    pub dangling: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    pub name: String,

    /// Indexed column names, in index order
    pub fields: Vec<String>,

    pub unique: bool,
}

/// Every definition built in one run, keyed by table name in input order,
/// together with the diagnostics recorded while building them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Definitions {
    pub(super) definitions: IndexMap<String, Definition>,
    pub(super) diagnostics: Vec<Diagnostic>,
}

impl Definition {
    /// The attribute generated for `column`.
    pub fn attribute(&self, column: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.column == column)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Attribute> + '_ {
        self.attributes.iter().filter(|attr| attr.primary_key)
    }

    pub fn associations_of(&self, kind: AssociationKind) -> impl Iterator<Item = &Association> + '_ {
        self.associations
            .iter()
            .filter(move |association| association.kind == kind)
    }
}

impl Definitions {
    pub fn get(&self, table: &str) -> Option<&Definition> {
        self.definitions.get(table)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Definition> + '_ {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Name collisions between generated models or files.
    pub fn collisions(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.is_collision())
    }
}

impl<'a> IntoIterator for &'a Definitions {
    type Item = &'a Definition;
    type IntoIter = indexmap::map::Values<'a, String, Definition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.values()
    }
}
