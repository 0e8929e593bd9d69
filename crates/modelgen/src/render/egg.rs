use super::{associate, attributes, define, model_ident, options};

use modelgen_core::render::RenderOptions;
use modelgen_core::schema::Definition;

/// An Egg.js model loader, `app/model/<file>.js`.
pub(super) fn render(definition: &Definition, opts: &RenderOptions) -> String {
    let namespace = if opts.sequelize_namespace.is_empty() {
        "app.Sequelize"
    } else {
        opts.sequelize_namespace.as_str()
    };

    let mut out = String::from("\"use strict\";\n\nmodule.exports = app => {\n");
    out.push_str(&format!("  const DataTypes = {namespace};\n"));
    out.push_str("  const sequelize = app.model;\n");
    out.push_str(&attributes(definition, "  "));
    out.push_str(&options(definition, "  "));
    out.push_str(&define(definition, "  ", "sequelize"));
    out.push_str(&associate(definition, "  ", false));
    out.push_str(&format!("  return {};\n", model_ident(definition)));
    out.push_str("};\n");
    out
}
