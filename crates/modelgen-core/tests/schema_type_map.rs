use modelgen_core::schema::{ColumnMeta, Dialect, LogicalType, MappedType, TypeMap, TypeStatus};

fn map(dialect: Dialect, raw: &str) -> MappedType {
    TypeMap::for_dialect(dialect).map(raw, &ColumnMeta::default())
}

#[test]
fn varchar_keeps_length() {
    let ty = map(Dialect::Mysql, "varchar(255)");

    assert_eq!(ty.logical, LogicalType::String);
    assert_eq!(ty.token, "varchar");
    assert_eq!(ty.params.length, Some(255));
    assert_eq!(ty.status, TypeStatus::Recognized);
}

#[test]
fn decimal_keeps_precision_and_scale() {
    let ty = map(Dialect::Mysql, "DECIMAL(10,2)");

    assert_eq!(ty.logical, LogicalType::Number);
    assert_eq!(ty.params.precision, Some(10));
    assert_eq!(ty.params.scale, Some(2));
    assert_eq!(ty.params.length, None);
    assert_eq!(ty.raw, "DECIMAL(10,2)");
}

#[test]
fn single_argument_numeric_is_a_precision() {
    let ty = map(Dialect::Postgres, "numeric(12)");

    assert_eq!(ty.params.precision, Some(12));
    assert_eq!(ty.params.length, None);
}

#[test]
fn unsigned_int() {
    let ty = map(Dialect::Mysql, "int(10) unsigned");

    assert_eq!(ty.logical, LogicalType::Number);
    assert!(ty.params.unsigned);
    assert!(!ty.params.zerofill);
    assert_eq!(ty.params.length, Some(10));
}

#[test]
fn tinyint_one_is_boolean_in_mysql_family() {
    for dialect in [Dialect::Mysql, Dialect::Mariadb] {
        assert_eq!(map(dialect, "tinyint(1)").logical, LogicalType::Boolean);
    }

    assert_eq!(map(Dialect::Mysql, "tinyint(4)").logical, LogicalType::Number);
    assert_eq!(map(Dialect::Sqlite, "tinyint(1)").logical, LogicalType::Number);
}

#[test]
fn postgres_time_zone_suffix_is_stripped() {
    let ty = map(Dialect::Postgres, "timestamp with time zone");

    assert_eq!(ty.token, "timestamp");
    assert_eq!(ty.logical, LogicalType::Date);
}

#[test]
fn postgres_arrays_are_unrecognized_by_default() {
    let ty = map(Dialect::Postgres, "integer[]");

    assert_eq!(ty.token, "array");
    assert_eq!(ty.logical, LogicalType::Other);
    assert_eq!(ty.status, TypeStatus::Unrecognized);
}

#[test]
fn mysql_enum_values() {
    let ty = map(Dialect::Mysql, "enum('draft','published','it''s')");

    assert_eq!(ty.logical, LogicalType::Enum);
    assert_eq!(ty.enum_values, ["draft", "published", "it's"]);
    assert!(ty.is_recognized());
}

#[test]
fn enum_literal_may_contain_parentheses() {
    let ty = map(Dialect::Mysql, "enum('(none)','x')");

    assert_eq!(ty.logical, LogicalType::Enum);
    assert_eq!(ty.token, "enum");
    assert_eq!(ty.enum_values, ["(none)", "x"]);
    assert!(ty.is_recognized());
}

#[test]
fn enum_with_charset_clause() {
    let ty = map(Dialect::Mysql, "enum('a','b') CHARACTER SET utf8mb4 COLLATE utf8mb4_bin");

    assert_eq!(ty.logical, LogicalType::Enum);
    assert_eq!(ty.token, "enum");
    assert_eq!(ty.enum_values, ["a", "b"]);

    let ty = map(Dialect::Mysql, "varchar(32) character set latin1");
    assert_eq!(ty.token, "varchar");
    assert_eq!(ty.params.length, Some(32));
}

#[test]
fn postgres_user_defined_enum_reads_labels_from_meta() {
    let meta = ColumnMeta {
        special: vec!["active".to_string(), "banned".to_string()],
        ..ColumnMeta::default()
    };

    let ty = TypeMap::for_dialect(Dialect::Postgres).map("USER-DEFINED", &meta);

    assert_eq!(ty.logical, LogicalType::Enum);
    assert_eq!(ty.enum_values, ["active", "banned"]);
}

#[test]
fn malformed_enum_degrades_to_string() {
    let ty = map(Dialect::Mysql, "enum('a','b'");
    assert_eq!(ty.logical, LogicalType::String);
    assert!(ty.enum_values.is_empty());
    assert_eq!(ty.status, TypeStatus::MalformedEnum);

    // No labels reported for the column
    let ty = map(Dialect::Postgres, "USER-DEFINED");
    assert_eq!(ty.logical, LogicalType::String);
    assert_eq!(ty.status, TypeStatus::MalformedEnum);
}

#[test]
fn unknown_type_keeps_raw_string() {
    let ty = map(Dialect::Mysql, "geometry");

    assert_eq!(ty.logical, LogicalType::Other);
    assert_eq!(ty.raw, "geometry");
    assert_eq!(ty.status, TypeStatus::Unrecognized);
}

#[test]
fn map_without_entry_keeps_raw_and_params() {
    let ty = TypeMap::empty(Dialect::Mysql).map("varchar(255)", &ColumnMeta::default());

    assert_eq!(ty.logical, LogicalType::Other);
    assert_eq!(ty.raw, "varchar(255)");
    assert_eq!(ty.params.length, Some(255));
    assert!(!ty.is_recognized());
}

#[test]
fn overrides_replace_builtin_entries() {
    let map = TypeMap::for_dialect(Dialect::Postgres)
        .with("CITEXT", LogicalType::Other)
        .extend([("geometry", LogicalType::Json)]);

    let meta = ColumnMeta::default();
    assert_eq!(map.map("citext", &meta).logical, LogicalType::Other);
    assert_eq!(map.map("geometry", &meta).logical, LogicalType::Json);
    assert_eq!(map.map("jsonb", &meta).logical, LogicalType::Json);
}

#[test]
fn every_dialect_maps_common_types() {
    for dialect in Dialect::ALL {
        let map = TypeMap::for_dialect(dialect);
        let meta = ColumnMeta::default();

        assert_eq!(map.map("varchar(32)", &meta).logical, LogicalType::String, "{dialect}");
        assert_eq!(map.map("int", &meta).logical, LogicalType::Number, "{dialect}");
        assert_eq!(map.map("date", &meta).logical, LogicalType::Date, "{dialect}");
    }
}
