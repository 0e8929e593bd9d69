use super::{associate, attributes, define, model_ident, options};

use modelgen_core::render::RenderOptions;
use modelgen_core::schema::Definition;

pub(super) fn render(definition: &Definition, opts: &RenderOptions) -> String {
    let mut out = if opts.sequelize_namespace.is_empty() {
        "const {\n  DataTypes\n} = require(\"sequelize\");\n".to_string()
    } else {
        format!("const {{\n  DataTypes\n}} = {};\n", opts.sequelize_namespace)
    };

    out.push_str("\nmodule.exports = sequelize => {\n");
    out.push_str(&attributes(definition, "  "));
    out.push_str(&options(definition, "  "));
    out.push_str(&define(definition, "  ", "sequelize"));
    out.push_str(&associate(definition, "  ", false));
    out.push_str(&format!("  return {};\n", model_ident(definition)));
    out.push_str("};\n");
    out
}
