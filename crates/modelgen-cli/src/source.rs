use anyhow::Result;
use clap::Args;
use modelgen::schema::Dialect;
use modelgen::{Automate, CodeStyle, Config, SnapshotIntrospector};
use std::path::PathBuf;

/// Where the schema is read from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Database connection URL, e.g. `sqlite:./app.db`
    #[arg(long)]
    pub url: Option<String>,

    /// Path to a SQLite database file
    #[arg(long)]
    pub sqlite: Option<PathBuf>,

    /// Path to a snapshot file written by `modelgen snapshot`
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

/// Generator options. Flags override the options file.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// TOML options file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Code style: js, ts, egg or midway
    #[arg(short = 't', long = "type")]
    pub style: Option<CodeStyle>,

    /// Override the dialect reported by the database
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Only these tables
    #[arg(long, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,

    /// Every table except these
    #[arg(long, value_delimiter = ',')]
    pub skip_tables: Option<Vec<String>>,

    /// UpperCamelCase model names
    #[arg(long)]
    pub camel_case: bool,

    /// lowerCamelCase attribute names
    #[arg(long)]
    pub attr_camel_case: bool,

    /// lowerCamelCase file names
    #[arg(long)]
    pub file_name_camel_case: bool,

    /// Name files after their model
    #[arg(long)]
    pub file_name_matches_model: bool,

    /// Suffix appended to model names
    #[arg(long)]
    pub model_suffix: Option<String>,

    /// Do not append a suffix to model names
    #[arg(long)]
    pub no_model_suffix: bool,

    /// Singularize table names in model names
    #[arg(long)]
    pub singular_model_names: bool,

    /// Infer belongsToMany associations through junction tables
    #[arg(long)]
    pub infer_many_to_many: bool,

    /// Expression to read DataTypes from instead of requiring sequelize
    #[arg(long)]
    pub sequelize_namespace: Option<String>,

    /// Prepend `// @ts-nocheck` to TypeScript files
    #[arg(long)]
    pub ts_no_check: bool,

    /// Directory for model files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Directory for TypeScript declaration files
    #[arg(long)]
    pub types_dir: Option<PathBuf>,

    /// Remove existing files from the output directories first
    #[arg(long)]
    pub empty_dir: bool,
}

impl SourceArgs {
    /// Opens the schema source.
    pub fn automate(&self, config: Config) -> Result<Automate> {
        let automate = if let Some(url) = &self.url {
            Automate::connect(url, config)?
        } else if let Some(path) = &self.sqlite {
            Automate::new(modelgen::Sqlite::open(path)?, config)?
        } else if let Some(path) = &self.snapshot {
            Automate::new(SnapshotIntrospector::load(path)?, config)?
        } else {
            anyhow::bail!("one of --url, --sqlite or --snapshot is required");
        };

        Ok(automate)
    }
}

impl OptionArgs {
    /// The options file, if any, with the flags layered on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(style) = self.style {
            config.style = style;
        }
        if let Some(dialect) = self.dialect {
            config.dialect = Some(dialect);
        }
        if let Some(tables) = &self.tables {
            config.tables = Some(tables.clone());
        }
        if let Some(skip_tables) = &self.skip_tables {
            config.skip_tables = Some(skip_tables.clone());
        }
        if let Some(suffix) = &self.model_suffix {
            config.model_suffix = suffix.clone();
        }
        if let Some(namespace) = &self.sequelize_namespace {
            config.sequelize_namespace = namespace.clone();
        }
        if let Some(dir) = &self.dir {
            config.dir = dir.clone();
        }
        if let Some(types_dir) = &self.types_dir {
            config.types_dir = Some(types_dir.clone());
        }

        // Flags can only switch options on
        config.camel_case |= self.camel_case;
        config.attr_camel_case |= self.attr_camel_case;
        config.file_name_camel_case |= self.file_name_camel_case;
        config.file_name_matches_model |= self.file_name_matches_model;
        config.no_model_suffix |= self.no_model_suffix;
        config.singular_model_names |= self.singular_model_names;
        config.infer_many_to_many |= self.infer_many_to_many;
        config.ts_no_check |= self.ts_no_check;
        config.empty_dir |= self.empty_dir;

        config.validate()?;
        Ok(config)
    }
}
