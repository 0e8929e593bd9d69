//! The built-in Sequelize renderer.
//!
//! Each code style shares the attribute, options and association blocks and
//! only differs in the module wrapper around them.

mod data_type;
mod egg;
mod js;
mod midway;
mod ts;
mod types;

use modelgen_core::render::{FileKind, GeneratedFile, RenderOptions};
use modelgen_core::schema::{AssociationKind, Definition, Definitions};
use modelgen_core::{CodeStyle, Renderer, Result};

use heck::ToUpperCamelCase;

/// Renders Sequelize model modules in every supported [`CodeStyle`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Sequelize;

impl Sequelize {
    pub fn new() -> Self {
        Self
    }

    /// Renders the model module for one definition.
    pub fn render_model(&self, definition: &Definition, options: &RenderOptions) -> String {
        let body = match options.style {
            CodeStyle::Js => js::render(definition, options),
            CodeStyle::Ts => ts::render(definition, options),
            CodeStyle::Egg => egg::render(definition, options),
            CodeStyle::Midway => midway::render(definition, options),
        };

        if options.style.is_typescript() && options.ts_no_check {
            format!("// @ts-nocheck\n{body}")
        } else {
            body
        }
    }

    /// Renders the TypeScript declaration file for one definition.
    pub fn render_types(&self, definition: &Definition, options: &RenderOptions) -> String {
        types::render(definition, options)
    }
}

impl Renderer for Sequelize {
    fn render(
        &self,
        definitions: &Definitions,
        options: &RenderOptions,
    ) -> Result<Vec<GeneratedFile>> {
        let mut files = vec![];

        for definition in definitions {
            files.push(GeneratedFile {
                kind: FileKind::Model,
                table_name: definition.table_name.clone(),
                file_name: format!("{}.{}", definition.file_name, options.style.extension()),
                contents: self.render_model(definition, options),
            });

            if options.style.is_typescript() {
                files.push(GeneratedFile {
                    kind: FileKind::Types,
                    table_name: definition.table_name.clone(),
                    file_name: format!("{}.d.ts", definition.file_name),
                    contents: self.render_types(definition, options),
                });
            }
        }

        tracing::debug!(style = %options.style, files = files.len(), "rendered models");

        Ok(files)
    }
}

/// A JavaScript string literal.
pub(crate) fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// The variable holding the model in generated code, e.g. `UserModel`.
fn model_ident(definition: &Definition) -> String {
    let ident = definition.model_name.to_upper_camel_case();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Model{ident}")
    } else {
        ident
    }
}

/// `object.key`, or `object["key"]` when `key` is not an identifier.
fn member(object: &str, key: &str) -> String {
    if is_ident(key) {
        format!("{object}.{key}")
    } else {
        format!("{object}[{}]", quote(key))
    }
}

/// An object literal key.
fn key(name: &str) -> String {
    if is_ident(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `const attributes = { ... };`
fn attributes(definition: &Definition, indent: &str) -> String {
    let mut out = format!("{indent}const attributes = {{\n");

    for (i, attr) in definition.attributes.iter().enumerate() {
        let mut fields = vec![format!("type: {}", data_type::data_type(&attr.ty))];

        fields.push(format!("allowNull: {}", attr.nullable));

        if let Some(default_value) = data_type::default_value(attr) {
            fields.push(format!("defaultValue: {default_value}"));
        }
        if attr.primary_key {
            fields.push("primaryKey: true".to_string());
        }
        if attr.auto_increment {
            fields.push("autoIncrement: true".to_string());
        }
        if attr.unique {
            fields.push("unique: true".to_string());
        }
        if let Some(comment) = &attr.comment {
            fields.push(format!("comment: {}", quote(comment)));
        }
        if attr.name != attr.column {
            fields.push(format!("field: {}", quote(&attr.column)));
        }

        out.push_str(&format!("{indent}  {}: {{\n", key(&attr.name)));
        out.push_str(&join_fields(&fields, &format!("{indent}    ")));
        out.push_str(&format!("{indent}  }}"));
        if i + 1 < definition.attributes.len() {
            out.push(',');
        }
        out.push('\n');
    }

    out.push_str(&format!("{indent}}};\n"));
    out
}

/// `const options = { ... };`
fn options(definition: &Definition, indent: &str) -> String {
    let mut fields = vec![format!("tableName: {}", quote(&definition.table_name))];

    if !definition.indexes.is_empty() {
        let indexes: Vec<_> = definition
            .indexes
            .iter()
            .map(|index| {
                let fields: Vec<_> = index.fields.iter().map(|field| quote(field)).collect();
                format!(
                    "{{\n{indent}    name: {},\n{indent}    unique: {},\n{indent}    fields: [{}]\n{indent}  }}",
                    quote(&index.name),
                    index.unique,
                    fields.join(", ")
                )
            })
            .collect();

        fields.push(format!("indexes: [{}]", indexes.join(", ")));
    }

    format!(
        "{indent}const options = {{\n{}{indent}}};\n",
        join_fields(&fields, &format!("{indent}  "))
    )
}

/// `Model.associate = models => { ... };`, empty when the model has no
/// associations.
///
/// Associations whose target is not generated are kept as comments.
fn associate(definition: &Definition, indent: &str, typescript: bool) -> String {
    if definition.associations.is_empty() {
        return String::new();
    }

    let model = model_ident(definition);
    let mut out = if typescript {
        format!("{indent}({model} as any).associate = (models: any) => {{\n")
    } else {
        format!("{indent}{model}.associate = models => {{\n")
    };

    for association in &definition.associations {
        let method = match association.kind {
            AssociationKind::BelongsTo => "belongsTo",
            AssociationKind::HasMany => "hasMany",
            AssociationKind::BelongsToMany => "belongsToMany",
        };

        if association.dangling {
            out.push_str(&format!(
                "{indent}  // {method} {}: table `{}` is not generated\n",
                association.foreign_key, association.target_table
            ));
            continue;
        }

        let mut args = vec![];
        if let Some(through) = &association.through {
            args.push(format!("through: {}", quote(through)));
        }
        args.push(format!("foreignKey: {}", quote(&association.foreign_key_attr)));
        match association.kind {
            AssociationKind::BelongsTo => {
                args.push(format!("targetKey: {}", quote(&association.target_key_attr)));
            }
            AssociationKind::HasMany => {
                args.push(format!("sourceKey: {}", quote(&association.target_key_attr)));
            }
            AssociationKind::BelongsToMany => {
                if let Some(other_key) = &association.other_key_attr {
                    args.push(format!("otherKey: {}", quote(other_key)));
                }
            }
        }

        out.push_str(&format!(
            "{indent}  {model}.{method}({}, {{ {} }});\n",
            member("models", &association.target_model),
            args.join(", ")
        ));
    }

    out.push_str(&format!("{indent}}};\n"));
    out
}

/// `const Model = sequelize.define(...);`
fn define(definition: &Definition, indent: &str, sequelize: &str) -> String {
    format!(
        "{indent}const {} = {sequelize}.define({}, attributes, options);\n",
        model_ident(definition),
        quote(&definition.model_name)
    )
}

fn join_fields(fields: &[String], indent: &str) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        out.push_str(indent);
        out.push_str(field);
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out
}
