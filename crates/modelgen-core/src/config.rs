use crate::schema::{Dialect, LogicalType, Naming, TypeMap};
use crate::{Error, Result};

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Configuration for a generator run.
///
/// Every option has a default, so an options file only needs the keys it
/// changes. Call [`Config::validate`] once before using the value; the
/// orchestrator does this on construction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Code style of the generated files
    #[serde(rename = "type")]
    pub style: CodeStyle,

    /// Overrides the dialect reported by the introspector
    pub dialect: Option<Dialect>,

    /// Expression the generated code reads `DataTypes` from instead of
    /// requiring `sequelize`, e.g. `app.Sequelize`
    pub sequelize_namespace: String,

    /// UpperCamelCase model names
    pub camel_case: bool,

    /// lowerCamelCase attribute names
    pub attr_camel_case: bool,

    /// lowerCamelCase file names
    pub file_name_camel_case: bool,

    /// Name each file after its model
    pub file_name_matches_model: bool,

    /// Suffix appended to model names
    pub model_suffix: String,

    /// Do not append `model_suffix`
    pub no_model_suffix: bool,

    /// Singularize table names when deriving model names
    pub singular_model_names: bool,

    /// Infer `belongsToMany` associations through junction tables
    pub infer_many_to_many: bool,

    /// Directory for model files
    pub dir: PathBuf,

    /// Directory for TypeScript type files, defaults to `dir`
    pub types_dir: Option<PathBuf>,

    /// Remove existing files from the output directories first
    pub empty_dir: bool,

    /// Only generate these tables
    pub tables: Option<Vec<String>>,

    /// Generate every table except these
    pub skip_tables: Option<Vec<String>>,

    /// Prepend `// @ts-nocheck` to TypeScript files
    pub ts_no_check: bool,

    /// Extra raw type token to logical type entries, applied over the
    /// dialect's built-in map
    pub type_overrides: IndexMap<String, LogicalType>,
}

/// Target code style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStyle {
    /// CommonJS module calling `sequelize.define`
    #[default]
    Js,

    /// TypeScript module with a companion `.d.ts` types file
    Ts,

    /// Egg.js model loader
    Egg,

    /// Midway provider, TypeScript
    #[serde(alias = "@ali/midway")]
    Midway,
}

/// Which of the database's tables a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    All,
    Only(Vec<String>),
    Skip(Vec<String>),
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads options from a TOML file. Keys missing from the file keep their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        contents.parse().map_err(|err: Error| {
            err.context(Error::invalid_config(format!(
                "cannot read options file `{}`",
                path.display()
            )))
        })
    }

    /// Checks option combinations that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        self.selection()?;

        if !self.no_model_suffix {
            let suffix = self.model_suffix.trim();
            if suffix.is_empty() {
                return Err(Error::invalid_config(
                    "`modelSuffix` must not be empty unless `noModelSuffix` is set",
                ));
            }
            if !suffix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::invalid_config(format!(
                    "`modelSuffix` must be alphanumeric; got `{suffix}`"
                )));
            }
        }

        if self.dir.as_os_str().is_empty() {
            return Err(Error::invalid_config("`dir` must not be empty"));
        }

        if let Some(types_dir) = &self.types_dir {
            if types_dir.as_os_str().is_empty() {
                return Err(Error::invalid_config("`typesDir` must not be empty"));
            }
        }

        Ok(())
    }

    /// The table selection described by `tables` / `skip_tables`.
    pub fn selection(&self) -> Result<TableSelection> {
        let check = |key: &str, tables: &[String]| {
            if tables.iter().any(|table| table.trim().is_empty()) {
                Err(Error::invalid_config(format!(
                    "`{key}` must not contain empty table names"
                )))
            } else {
                Ok(())
            }
        };

        match (&self.tables, &self.skip_tables) {
            (Some(_), Some(_)) => Err(Error::invalid_config(
                "`tables` and `skipTables` are mutually exclusive",
            )),
            (Some(tables), None) => {
                check("tables", tables)?;
                Ok(TableSelection::Only(tables.clone()))
            }
            (None, Some(skip)) => {
                check("skipTables", skip)?;
                Ok(TableSelection::Skip(skip.clone()))
            }
            (None, None) => Ok(TableSelection::All),
        }
    }

    /// Naming rules derived from the case and suffix options.
    pub fn naming(&self) -> Naming {
        Naming {
            camel_case: self.camel_case,
            attr_camel_case: self.attr_camel_case,
            file_name_camel_case: self.file_name_camel_case,
            file_name_matches_model: self.file_name_matches_model,
            model_suffix: (!self.no_model_suffix).then(|| self.model_suffix.trim().to_string()),
            singular: self.singular_model_names,
        }
    }

    /// The type map for `dialect` (or the configured override) with
    /// `type_overrides` applied.
    pub fn type_map(&self, dialect: Dialect) -> TypeMap {
        TypeMap::for_dialect(self.dialect.unwrap_or(dialect))
            .extend(self.type_overrides.iter().map(|(token, ty)| (token, *ty)))
    }

    /// Directory for TypeScript type files.
    pub fn types_dir(&self) -> &Path {
        self.types_dir.as_deref().unwrap_or(&self.dir)
    }

    pub fn style(mut self, style: CodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    pub fn camel_case(mut self, enabled: bool) -> Self {
        self.camel_case = enabled;
        self
    }

    pub fn attr_camel_case(mut self, enabled: bool) -> Self {
        self.attr_camel_case = enabled;
        self
    }

    pub fn file_name_camel_case(mut self, enabled: bool) -> Self {
        self.file_name_camel_case = enabled;
        self
    }

    pub fn file_name_matches_model(mut self, enabled: bool) -> Self {
        self.file_name_matches_model = enabled;
        self
    }

    pub fn model_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.model_suffix = suffix.into();
        self
    }

    pub fn no_model_suffix(mut self, enabled: bool) -> Self {
        self.no_model_suffix = enabled;
        self
    }

    pub fn singular_model_names(mut self, enabled: bool) -> Self {
        self.singular_model_names = enabled;
        self
    }

    pub fn infer_many_to_many(mut self, enabled: bool) -> Self {
        self.infer_many_to_many = enabled;
        self
    }

    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn types_dir_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.types_dir = Some(dir.into());
        self
    }

    pub fn empty_dir(mut self, enabled: bool) -> Self {
        self.empty_dir = enabled;
        self
    }

    pub fn tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = Some(tables.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_tables = Some(tables.into_iter().map(Into::into).collect());
        self
    }

    pub fn ts_no_check(mut self, enabled: bool) -> Self {
        self.ts_no_check = enabled;
        self
    }

    pub fn sequelize_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.sequelize_namespace = namespace.into();
        self
    }

    pub fn type_override(mut self, token: impl Into<String>, logical: LogicalType) -> Self {
        self.type_overrides.insert(token.into(), logical);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: CodeStyle::Js,
            dialect: None,
            sequelize_namespace: String::new(),
            camel_case: false,
            attr_camel_case: false,
            file_name_camel_case: false,
            file_name_matches_model: false,
            model_suffix: "model".to_string(),
            no_model_suffix: false,
            singular_model_names: false,
            infer_many_to_many: false,
            dir: PathBuf::from("models"),
            types_dir: None,
            empty_dir: false,
            tables: None,
            skip_tables: None,
            ts_no_check: false,
            type_overrides: IndexMap::new(),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

impl CodeStyle {
    pub const ALL: [CodeStyle; 4] = [CodeStyle::Js, CodeStyle::Ts, CodeStyle::Egg, CodeStyle::Midway];

    pub fn as_str(self) -> &'static str {
        match self {
            CodeStyle::Js => "js",
            CodeStyle::Ts => "ts",
            CodeStyle::Egg => "egg",
            CodeStyle::Midway => "midway",
        }
    }

    /// Returns `true` for styles that emit TypeScript.
    pub fn is_typescript(self) -> bool {
        matches!(self, CodeStyle::Ts | CodeStyle::Midway)
    }

    /// File extension of model files in this style.
    pub fn extension(self) -> &'static str {
        if self.is_typescript() {
            "ts"
        } else {
            "js"
        }
    }
}

impl fmt::Display for CodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "js" => Ok(CodeStyle::Js),
            "ts" => Ok(CodeStyle::Ts),
            "egg" => Ok(CodeStyle::Egg),
            "midway" | "@ali/midway" => Ok(CodeStyle::Midway),
            _ => Err(Error::invalid_config(format!(
                "unsupported code style `{s}`; expected one of js, ts, egg, midway"
            ))),
        }
    }
}

impl TableSelection {
    /// Applies the selection to every table in the database.
    ///
    /// Every table named by the selection must exist. `Only` keeps the order
    /// it was given in, `Skip` keeps the database's order.
    pub fn apply(&self, all: &[String]) -> Result<Vec<String>> {
        let known: IndexSet<&str> = all.iter().map(String::as_str).collect();

        let named = match self {
            TableSelection::All => return Ok(all.to_vec()),
            TableSelection::Only(tables) | TableSelection::Skip(tables) => tables,
        };

        if let Some(missing) = named.iter().find(|table| !known.contains(table.as_str())) {
            return Err(Error::table_not_found(missing.as_str()));
        }

        let selected: IndexSet<&str> = match self {
            TableSelection::Only(tables) => tables.iter().map(String::as_str).collect(),
            _ => known
                .into_iter()
                .filter(|table| !named.iter().any(|skip| skip == table))
                .collect(),
        };

        Ok(selected.into_iter().map(str::to_string).collect())
    }
}
