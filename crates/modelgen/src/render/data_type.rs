use super::quote;

use modelgen_core::schema::{Attribute, LogicalType, MappedType};

/// The `DataTypes` expression for a column type, e.g. `DataTypes.STRING(255)`.
pub(super) fn data_type(ty: &MappedType) -> String {
    let params = &ty.params;

    let base = match ty.logical {
        LogicalType::Enum => {
            let values: Vec<_> = ty.enum_values.iter().map(|value| quote(value)).collect();
            return format!("DataTypes.ENUM({})", values.join(", "));
        }
        LogicalType::Boolean => return "DataTypes.BOOLEAN".to_string(),
        LogicalType::Other => return quote(&ty.raw.to_ascii_uppercase()),
        _ => match ty.token.as_str() {
            "char" | "character" | "bpchar" | "nchar" | "native character" => {
                with_length("CHAR", params.length)
            }
            "tinytext" => "TEXT(\"tiny\")".to_string(),
            "mediumtext" => "TEXT(\"medium\")".to_string(),
            "longtext" => "TEXT(\"long\")".to_string(),
            "text" | "ntext" | "clob" | "citext" => "TEXT".to_string(),
            "uuid" | "uniqueidentifier" => "UUID".to_string(),
            "tinyint" => with_length("TINYINT", params.length),
            "smallint" | "int2" | "smallserial" => with_length("SMALLINT", params.length),
            "mediumint" => with_length("MEDIUMINT", params.length),
            "int" | "integer" | "int4" | "serial" => with_length("INTEGER", params.length),
            "bigint" | "big int" | "int8" | "bigserial" => with_length("BIGINT", params.length),
            "float" | "float4" => "FLOAT".to_string(),
            "real" => "REAL".to_string(),
            "double" | "double precision" | "float8" => "DOUBLE".to_string(),
            "decimal" | "dec" | "numeric" | "fixed" | "money" | "smallmoney" => {
                match (params.precision, params.scale) {
                    (Some(precision), Some(scale)) => format!("DECIMAL({precision}, {scale})"),
                    (Some(precision), None) => format!("DECIMAL({precision})"),
                    _ => "DECIMAL".to_string(),
                }
            }
            "date" => "DATEONLY".to_string(),
            "time" | "timetz" => "TIME".to_string(),
            "datetime" | "datetime2" | "timestamp" | "timestamptz" | "smalldatetime"
            | "datetimeoffset" => match params.precision.map(u64::from).or(params.length) {
                Some(fsp) => format!("DATE({fsp})"),
                None => "DATE".to_string(),
            },
            "jsonb" => "JSONB".to_string(),
            "bytea" | "blob" | "binary" | "varbinary" | "image" => "BLOB".to_string(),
            "tinyblob" => "BLOB(\"tiny\")".to_string(),
            "mediumblob" => "BLOB(\"medium\")".to_string(),
            "longblob" => "BLOB(\"long\")".to_string(),
            _ => fallback(ty.logical, params.length),
        },
    };

    let mut expr = format!("DataTypes.{base}");

    if ty.logical == LogicalType::Number {
        if params.unsigned {
            expr.push_str(".UNSIGNED");
        }
        if params.zerofill {
            expr.push_str(".ZEROFILL");
        }
    }

    expr
}

/// The `defaultValue` expression for an attribute, if it has a default.
///
/// `sequelize` must be in scope where the expression is used.
pub(super) fn default_value(attr: &Attribute) -> Option<String> {
    let raw = attr.default_value.as_deref()?.trim();

    // Postgres appends the cast: `'draft'::character varying`
    let value = match raw.rfind("::") {
        Some(pos) if raw.starts_with('\'') => &raw[..pos],
        _ => raw,
    };

    if value.eq_ignore_ascii_case("null") {
        return Some("null".to_string());
    }

    if let Some(literal) = unquote(value) {
        return Some(quote(&literal));
    }

    let upper = value.to_ascii_uppercase();
    if matches!(
        upper.as_str(),
        "CURRENT_TIMESTAMP" | "CURRENT_TIMESTAMP()" | "NOW()" | "GETDATE()"
    ) || upper.starts_with("CURRENT_TIMESTAMP(")
        || upper.starts_with("NEXTVAL(")
    {
        return Some(format!("sequelize.literal({})", quote(value)));
    }

    match attr.ty.logical {
        LogicalType::Boolean => match upper.as_str() {
            "1" | "TRUE" | "B'1'" => return Some("true".to_string()),
            "0" | "FALSE" | "B'0'" => return Some("false".to_string()),
            _ => {}
        },
        LogicalType::Number if value.parse::<f64>().is_ok() => return Some(value.to_string()),
        _ => {}
    }

    Some(quote(value))
}

fn with_length(name: &str, length: Option<u64>) -> String {
    match length {
        Some(length) => format!("{name}({length})"),
        None => name.to_string(),
    }
}

fn fallback(logical: LogicalType, length: Option<u64>) -> String {
    match logical {
        LogicalType::String => with_length("STRING", length),
        LogicalType::Number => "DECIMAL".to_string(),
        LogicalType::Date => "DATE".to_string(),
        LogicalType::Binary => "BLOB".to_string(),
        LogicalType::Json => "JSON".to_string(),
        LogicalType::Boolean => "BOOLEAN".to_string(),
        LogicalType::Enum | LogicalType::Other => "STRING".to_string(),
    }
}

/// Strips one level of single quotes, undoubling escaped quotes.
fn unquote(value: &str) -> Option<String> {
    let inner = value.strip_prefix('\'')?.strip_suffix('\'')?;
    Some(inner.replace("''", "'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::schema::{ColumnMeta, Dialect, TypeMap};

    fn ty(dialect: Dialect, raw: &str) -> MappedType {
        TypeMap::for_dialect(dialect).map(raw, &ColumnMeta::default())
    }

    fn attr(raw_type: &str, default_value: &str) -> Attribute {
        Attribute {
            name: "a".to_string(),
            column: "a".to_string(),
            ty: ty(Dialect::Postgres, raw_type),
            nullable: false,
            primary_key: false,
            unique: false,
            auto_increment: false,
            default_value: Some(default_value.to_string()),
            comment: None,
        }
    }

    #[test]
    fn data_types() {
        assert_eq!(data_type(&ty(Dialect::Mysql, "varchar(255)")), "DataTypes.STRING(255)");
        assert_eq!(
            data_type(&ty(Dialect::Mysql, "int(11) unsigned")),
            "DataTypes.INTEGER(11).UNSIGNED"
        );
        assert_eq!(
            data_type(&ty(Dialect::Mysql, "decimal(10,2)")),
            "DataTypes.DECIMAL(10, 2)"
        );
        assert_eq!(data_type(&ty(Dialect::Mysql, "tinyint(1)")), "DataTypes.BOOLEAN");
        assert_eq!(
            data_type(&ty(Dialect::Mysql, "enum('a','b')")),
            "DataTypes.ENUM(\"a\", \"b\")"
        );
        assert_eq!(data_type(&ty(Dialect::Mysql, "geometry")), "\"GEOMETRY\"");
        assert_eq!(data_type(&ty(Dialect::Postgres, "jsonb")), "DataTypes.JSONB");
        assert_eq!(data_type(&ty(Dialect::Postgres, "date")), "DataTypes.DATEONLY");
    }

    #[test]
    fn default_values() {
        assert_eq!(
            default_value(&attr("varchar", "'draft'::character varying")).as_deref(),
            Some("\"draft\"")
        );
        assert_eq!(
            default_value(&attr("timestamp", "CURRENT_TIMESTAMP")).as_deref(),
            Some("sequelize.literal(\"CURRENT_TIMESTAMP\")")
        );
        assert_eq!(default_value(&attr("integer", "42")).as_deref(), Some("42"));
        assert_eq!(default_value(&attr("boolean", "false")).as_deref(), Some("false"));
        assert_eq!(default_value(&attr("text", "NULL")).as_deref(), Some("null"));
        assert_eq!(default_value(&attr("text", "'it''s'")).as_deref(), Some("\"it's\""));
    }
}
