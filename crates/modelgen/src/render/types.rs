use super::{key, model_ident, quote};

use modelgen_core::render::RenderOptions;
use modelgen_core::schema::{Attribute, Definition, LogicalType};

/// `<file>.d.ts`: the attribute interface of one model.
pub(super) fn render(definition: &Definition, opts: &RenderOptions) -> String {
    let mut out = String::new();
    if opts.ts_no_check {
        out.push_str("// @ts-nocheck\n");
    }

    out.push_str(&format!(
        "export interface {}Attributes {{\n",
        model_ident(definition)
    ));

    for attr in &definition.attributes {
        let optional = if is_optional(attr) { "?" } else { "" };
        let nullable = if attr.nullable { " | null" } else { "" };

        out.push_str(&format!(
            "  {}{optional}: {}{nullable};\n",
            key(&attr.name),
            ts_type(attr)
        ));
    }

    out.push_str("}\n");
    out
}

/// The database fills the value in when the attribute is left out.
fn is_optional(attr: &Attribute) -> bool {
    attr.nullable || attr.auto_increment || attr.default_value.is_some()
}

fn ts_type(attr: &Attribute) -> String {
    match attr.ty.logical {
        LogicalType::String => "string".to_string(),
        LogicalType::Number => "number".to_string(),
        LogicalType::Boolean => "boolean".to_string(),
        LogicalType::Date => "Date".to_string(),
        LogicalType::Binary => "Buffer".to_string(),
        LogicalType::Json => "object".to_string(),
        LogicalType::Enum => {
            let values: Vec<_> = attr.ty.enum_values.iter().map(|value| quote(value)).collect();
            values.join(" | ")
        }
        LogicalType::Other => "any".to_string(),
    }
}
