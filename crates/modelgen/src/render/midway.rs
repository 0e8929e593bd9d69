use super::{associate, attributes, define, model_ident, options, quote};

use modelgen_core::render::RenderOptions;
use modelgen_core::schema::Definition;

/// A Midway provider registering the model under its model name.
pub(super) fn render(definition: &Definition, opts: &RenderOptions) -> String {
    let mut out = String::from(
        "import {\n  IApplicationContext,\n  providerWrapper\n} from \"midway\";\n",
    );

    if opts.sequelize_namespace.is_empty() {
        out.push_str("import {\n  DataTypes\n} from \"sequelize\";\n");
    }
    out.push_str("import {\n  IDB\n} from \"./db\";\n");

    if !opts.sequelize_namespace.is_empty() {
        out.push_str(&format!(
            "\nconst {{\n  DataTypes\n}} = {};\n",
            opts.sequelize_namespace
        ));
    }

    let model = model_ident(definition);

    out.push_str("\nexport default async function setupModel(context: IApplicationContext) {\n");
    out.push_str("  const db: IDB = await context.getAsync(\"DB\");\n");
    out.push_str("  const sequelize = db.sequelize;\n");
    out.push_str(&attributes(definition, "  "));
    out.push_str(&options(definition, "  "));
    out.push_str(&define(definition, "  ", "sequelize"));
    out.push_str(&associate(definition, "  ", true));
    out.push_str(&format!("  return {model};\n"));
    out.push_str("}\n\n");
    out.push_str(&format!(
        "providerWrapper([{{\n  id: {},\n  provider: setupModel\n}}]);\n",
        quote(&model)
    ));
    out
}
