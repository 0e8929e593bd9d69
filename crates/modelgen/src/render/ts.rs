use super::{associate, attributes, define, model_ident, options};

use modelgen_core::render::RenderOptions;
use modelgen_core::schema::Definition;

pub(super) fn render(definition: &Definition, opts: &RenderOptions) -> String {
    let mut out = if opts.sequelize_namespace.is_empty() {
        "import {\n  DataTypes,\n  Sequelize\n} from \"sequelize\";\n".to_string()
    } else {
        format!(
            "import {{\n  Sequelize\n}} from \"sequelize\";\n\nconst {{\n  DataTypes\n}} = {};\n",
            opts.sequelize_namespace
        )
    };

    out.push_str("\nexport default function (sequelize: Sequelize) {\n");
    out.push_str(&attributes(definition, "  "));
    out.push_str(&options(definition, "  "));
    out.push_str(&define(definition, "  ", "sequelize"));
    out.push_str(&associate(definition, "  ", true));
    out.push_str(&format!("  return {};\n", model_ident(definition)));
    out.push_str("}\n");
    out
}
