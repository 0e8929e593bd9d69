use modelgen::schema::{Builder, Definitions, Dialect, RawColumn, RawForeignKey, RawIndex, RawTable};
use modelgen::{CodeStyle, Config, FileKind, RenderOptions, Renderer, Sequelize};

use pretty_assertions::assert_eq;

fn make_definitions(config: &Config) -> Definitions {
    let tables = [
        RawTable::new("user")
            .column(RawColumn::new("id", "int(11) unsigned").auto_increment())
            .column(
                RawColumn::new("email", "varchar(255)")
                    .comment("login"),
            )
            .column(RawColumn::new("created_at", "datetime").default_value("CURRENT_TIMESTAMP"))
            .index(RawIndex::primary(["id"]))
            .index(RawIndex::new("email", ["email"]).unique()),
        RawTable::new("post")
            .column(RawColumn::new("id", "int(11)").auto_increment())
            .column(RawColumn::new("user_id", "int(11)").nullable(true))
            .column(RawColumn::new("tenant_id", "int(11)"))
            .index(RawIndex::primary(["id"]))
            .foreign_key(RawForeignKey::new("user_id", "user", "id"))
            .foreign_key(RawForeignKey::new("tenant_id", "tenant", "id")),
    ];

    Builder::from_config(config, Dialect::Mysql)
        .build(&tables)
        .unwrap()
}

fn make_options(style: CodeStyle) -> RenderOptions {
    RenderOptions {
        style,
        ..RenderOptions::default()
    }
}

fn model(definitions: &Definitions, table: &str, options: &RenderOptions) -> String {
    Sequelize::new().render_model(definitions.get(table).unwrap(), options)
}

#[test]
fn js_model() {
    let definitions = make_definitions(&Config::new());
    let code = model(&definitions, "user", &make_options(CodeStyle::Js));

    assert_eq!(
        code,
        r#"const {
  DataTypes
} = require("sequelize");

module.exports = sequelize => {
  const attributes = {
    id: {
      type: DataTypes.INTEGER(11).UNSIGNED,
      allowNull: false,
      primaryKey: true,
      autoIncrement: true
    },
    email: {
      type: DataTypes.STRING(255),
      allowNull: false,
      unique: true,
      comment: "login"
    },
    created_at: {
      type: DataTypes.DATE,
      allowNull: false,
      defaultValue: sequelize.literal("CURRENT_TIMESTAMP")
    }
  };
  const options = {
    tableName: "user",
    indexes: [{
      name: "email",
      unique: true,
      fields: ["email"]
    }]
  };
  const UserModel = sequelize.define("user_model", attributes, options);
  UserModel.associate = models => {
    UserModel.hasMany(models.post_model, { foreignKey: "user_id", sourceKey: "id" });
  };
  return UserModel;
};
"#
    );
}

#[test]
fn attribute_field_when_names_differ() {
    let config = Config::new().attr_camel_case(true);
    let definitions = make_definitions(&config);
    let code = model(&definitions, "user", &make_options(CodeStyle::Js));

    assert!(code.contains("    createdAt: {\n"));
    assert!(code.contains("      field: \"created_at\"\n"));
}

#[test]
fn belongs_to_and_dangling_reference() {
    let config = Config::new().camel_case(true);
    let definitions = make_definitions(&config);
    let code = model(&definitions, "post", &make_options(CodeStyle::Js));

    assert!(code.contains(
        "PostModel.belongsTo(models.UserModel, { foreignKey: \"user_id\", targetKey: \"id\" });"
    ));
    assert!(code.contains("// belongsTo tenant_id: table `tenant` is not generated"));
}

#[test]
fn association_keys_follow_attribute_case() {
    let tables = [
        RawTable::new("user")
            .column(RawColumn::new("user_id", "int(11)"))
            .index(RawIndex::primary(["user_id"])),
        RawTable::new("post")
            .column(RawColumn::new("id", "int(11)"))
            .column(RawColumn::new("author_id", "int(11)"))
            .index(RawIndex::primary(["id"]))
            .foreign_key(RawForeignKey::new("author_id", "user", "user_id")),
    ];

    let config = Config::new().camel_case(true).attr_camel_case(true);
    let definitions = Builder::from_config(&config, Dialect::Mysql)
        .build(&tables)
        .unwrap();
    let options = make_options(CodeStyle::Js);

    assert!(model(&definitions, "post", &options).contains(
        "PostModel.belongsTo(models.UserModel, { foreignKey: \"authorId\", targetKey: \"userId\" });"
    ));
    assert!(model(&definitions, "user", &options).contains(
        "UserModel.hasMany(models.PostModel, { foreignKey: \"authorId\", sourceKey: \"userId\" });"
    ));
}

#[test]
fn egg_model() {
    let definitions = make_definitions(&Config::new());
    let code = model(&definitions, "user", &make_options(CodeStyle::Egg));

    assert!(code.starts_with(
        "\"use strict\";\n\nmodule.exports = app => {\n  const DataTypes = app.Sequelize;\n  const sequelize = app.model;\n"
    ));
    assert!(code.ends_with("  return UserModel;\n};\n"));
}

#[test]
fn sequelize_namespace() {
    let definitions = make_definitions(&Config::new());
    let options = RenderOptions {
        sequelize_namespace: "app.Sequelize".to_string(),
        ..make_options(CodeStyle::Js)
    };

    let code = model(&definitions, "user", &options);
    assert!(code.starts_with("const {\n  DataTypes\n} = app.Sequelize;\n"));
    assert!(!code.contains("require("));
}

#[test]
fn typescript_with_no_check() {
    let definitions = make_definitions(&Config::new());
    let options = RenderOptions {
        ts_no_check: true,
        ..make_options(CodeStyle::Ts)
    };

    let code = model(&definitions, "post", &options);
    assert!(code.starts_with("// @ts-nocheck\nimport {\n  DataTypes,\n  Sequelize\n} from \"sequelize\";\n"));
    assert!(code.contains("export default function (sequelize: Sequelize) {\n"));
    assert!(code.contains("(PostModel as any).associate = (models: any) => {\n"));

    // Plain JavaScript ignores the flag
    let js = model(&definitions, "post", &make_options(CodeStyle::Js));
    assert!(!js.contains("@ts-nocheck"));
}

#[test]
fn midway_provider() {
    let definitions = make_definitions(&Config::new());
    let code = model(&definitions, "user", &make_options(CodeStyle::Midway));

    assert!(code.contains("export default async function setupModel(context: IApplicationContext) {\n"));
    assert!(code.ends_with("providerWrapper([{\n  id: \"UserModel\",\n  provider: setupModel\n}]);\n"));
}

#[test]
fn types_file() {
    let definitions = make_definitions(&Config::new());
    let files = Sequelize::new()
        .render(&definitions, &make_options(CodeStyle::Ts))
        .unwrap();

    let types = files
        .iter()
        .find(|file| file.kind == FileKind::Types && file.table_name == "post")
        .unwrap();

    assert_eq!(types.file_name, "post.d.ts");
    assert_eq!(
        types.contents,
        "export interface PostModelAttributes {\n  id?: number;\n  user_id?: number | null;\n  tenant_id: number;\n}\n"
    );
}

#[test]
fn javascript_styles_have_no_types_file() {
    let definitions = make_definitions(&Config::new());

    for style in [CodeStyle::Js, CodeStyle::Egg] {
        let files = Sequelize::new().render(&definitions, &make_options(style)).unwrap();
        assert!(files.iter().all(|file| file.kind == FileKind::Model));
        assert_eq!(files[0].file_name, "user.js");
    }
}

#[test]
fn colliding_files_are_all_rendered() {
    let config = Config::new().file_name_matches_model(true).no_model_suffix(true).singular_model_names(true);
    let tables = [
        RawTable::new("user").column(RawColumn::new("id", "int")),
        RawTable::new("users").column(RawColumn::new("id", "int")),
    ];
    let definitions = Builder::from_config(&config, Dialect::Mysql)
        .build(&tables)
        .unwrap();

    let files = Sequelize::new()
        .render(&definitions, &make_options(CodeStyle::Js))
        .unwrap();

    let names: Vec<_> = files.iter().map(|file| file.file_name.as_str()).collect();
    assert_eq!(names, ["user.js", "user.js"]);
    assert_eq!(definitions.collisions().count(), 2);
}
