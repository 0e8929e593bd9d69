use crate::schema::Definitions;
use crate::{CodeStyle, Config, Result};

use std::fmt::Debug;

/// Turns definitions into source files.
pub trait Renderer: Debug + Send + Sync + 'static {
    fn render(
        &self,
        definitions: &Definitions,
        options: &RenderOptions,
    ) -> Result<Vec<GeneratedFile>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub style: CodeStyle,

    /// Prepend `// @ts-nocheck` to TypeScript files
    pub ts_no_check: bool,

    /// Expression to read `DataTypes` from. Empty means `require('sequelize')`.
    pub sequelize_namespace: String,
}

/// Where a generated file goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A model module, written to the model directory
    Model,

    /// A TypeScript declaration file, written to the types directory
    Types,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: FileKind,

    /// Table the file was generated from
    pub table_name: String,

    /// File name including its extension
    pub file_name: String,

    pub contents: String,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            style: config.style,
            ts_no_check: config.ts_no_check,
            sequelize_namespace: config.sequelize_namespace.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: CodeStyle::Js,
            ts_no_check: false,
            sequelize_namespace: String::new(),
        }
    }
}
