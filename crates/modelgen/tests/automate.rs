use modelgen::schema::{
    AssociationKind, Dialect, RawColumn, RawForeignKey, RawIndex, RawTable, TableRef,
};
use modelgen::{
    async_trait, Automate, CodeStyle, Config, Error, FileKind, Introspector, Result,
    SnapshotFile, SnapshotIntrospector,
};

use pretty_assertions::assert_eq;

fn make_tables() -> Vec<RawTable> {
    vec![
        RawTable::new("user")
            .column(RawColumn::new("id", "int(11)").auto_increment())
            .column(RawColumn::new("user_name", "varchar(64)"))
            .index(RawIndex::primary(["id"])),
        RawTable::new("post")
            .column(RawColumn::new("id", "int(11)").auto_increment())
            .column(RawColumn::new("user_id", "int(11)"))
            .index(RawIndex::primary(["id"]))
            .foreign_key(RawForeignKey::new("user_id", "user", "id")),
        RawTable::new("audit_log")
            .column(RawColumn::new("id", "bigint"))
            .index(RawIndex::primary(["id"])),
    ]
}

fn make_introspector() -> SnapshotIntrospector {
    SnapshotIntrospector::new(SnapshotFile::new(Dialect::Mysql, make_tables())).unwrap()
}

/// Fails every call that touches `table`.
#[derive(Debug)]
struct Failing {
    inner: SnapshotIntrospector,
    table: &'static str,
}

#[async_trait]
impl Introspector for Failing {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    async fn list_tables(&self) -> Result<Vec<TableRef>> {
        self.inner.list_tables().await
    }

    async fn describe_table(&self, table: &str) -> Result<Vec<RawColumn>> {
        if table == self.table {
            return Err(Error::introspection(std::io::Error::other("connection reset")));
        }
        self.inner.describe_table(table).await
    }

    async fn show_indexes(&self, table: &str) -> Result<Vec<RawIndex>> {
        self.inner.show_indexes(table).await
    }

    async fn foreign_keys(&self, table: &str) -> Result<Vec<RawForeignKey>> {
        self.inner.foreign_keys(table).await
    }
}

#[tokio::test]
async fn introspects_every_table_in_order() {
    let automate = Automate::new(make_introspector(), Config::new()).unwrap();

    let tables = automate.tables().await.unwrap();
    assert_eq!(tables, make_tables());
}

#[tokio::test]
async fn selected_tables_only() {
    let config = Config::new().tables(["post", "user"]);
    let automate = Automate::new(make_introspector(), config).unwrap();

    assert_eq!(automate.table_names().await.unwrap(), ["post", "user"]);

    let definitions = automate.definitions().await.unwrap();
    let names: Vec<_> = definitions.iter().map(|def| def.table_name.as_str()).collect();
    assert_eq!(names, ["post", "user"]);
}

#[tokio::test]
async fn skipped_tables() {
    let config = Config::new().skip_tables(["audit_log"]);
    let automate = Automate::new(make_introspector(), config).unwrap();

    assert_eq!(automate.table_names().await.unwrap(), ["user", "post"]);
}

#[tokio::test]
async fn unknown_selected_table_fails_before_mapping() {
    let config = Config::new().tables(["user", "ghost"]);
    let automate = Automate::new(make_introspector(), config).unwrap();

    let err = automate.definitions().await.unwrap_err();
    assert!(err.is_table_not_found());
}

#[test]
fn invalid_config_is_rejected_on_construction() {
    let config = Config::new().tables(["user"]).skip_tables(["post"]);

    let err = Automate::new(make_introspector(), config).unwrap_err();
    assert!(err.is_invalid_config());
}

#[tokio::test]
async fn introspection_failure_fails_the_run() {
    let failing = Failing {
        inner: make_introspector(),
        table: "post",
    };
    let automate = Automate::new(failing, Config::new()).unwrap();

    let err = automate.definitions().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "introspecting table `post`: introspection failed: connection reset"
    );
}

#[tokio::test]
async fn definitions_resolve_associations_across_tables() {
    let config = Config::new().camel_case(true).attr_camel_case(true);
    let automate = Automate::new(make_introspector(), config).unwrap();

    let definitions = automate.definitions().await.unwrap();

    let user = definitions.get("user").unwrap();
    assert_eq!(user.model_name, "UserModel");
    assert_eq!(user.attribute("user_name").unwrap().name, "userName");

    let has_many: Vec<_> = user.associations_of(AssociationKind::HasMany).collect();
    assert_eq!(has_many.len(), 1);
    assert_eq!(has_many[0].target_model, "PostModel");
}

#[tokio::test]
async fn configured_dialect_wins() {
    let config = Config::new().dialect(Dialect::Postgres);
    let automate = Automate::new(make_introspector(), config).unwrap();

    assert_eq!(automate.dialect(), Dialect::Postgres);
}

#[tokio::test]
async fn generate_typescript_files() {
    let config = Config::new().style(CodeStyle::Ts).tables(["user"]);
    let automate = Automate::new(make_introspector(), config).unwrap();

    let generated = automate.generate().await.unwrap();

    let files: Vec<_> = generated
        .files
        .iter()
        .map(|file| (file.kind, file.file_name.as_str()))
        .collect();
    assert_eq!(
        files,
        [(FileKind::Model, "user.ts"), (FileKind::Types, "user.d.ts")]
    );
}

#[tokio::test]
async fn run_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let models = dir.path().join("models");
    let types = dir.path().join("types");

    let config = Config::new()
        .style(CodeStyle::Ts)
        .dir(&models)
        .types_dir_path(&types);
    let automate = Automate::new(make_introspector(), config).unwrap();

    let generated = automate.run().await.unwrap();
    assert_eq!(generated.files.len(), 6);

    let post = std::fs::read_to_string(models.join("post.ts")).unwrap();
    assert!(post.contains("sequelize.define(\"post_model\", attributes, options)"));
    assert!(types.join("post.d.ts").exists());
    assert!(!models.join("post.d.ts").exists());
}

#[tokio::test]
async fn connect_to_snapshot_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.toml");
    SnapshotFile::new(Dialect::Postgres, make_tables())
        .save(&path)
        .unwrap();

    let url = format!("snapshot:{}", path.display());
    let automate = Automate::connect(&url, Config::new()).unwrap();

    assert_eq!(automate.dialect(), Dialect::Postgres);
    assert_eq!(automate.table_names().await.unwrap().len(), make_tables().len());
}

#[test]
fn connect_rejects_unknown_scheme() {
    let err = modelgen::connect("oracle://localhost/app").unwrap_err();
    assert!(err.is_invalid_config());
    assert!(err.to_string().contains("scheme=oracle"));
}

#[tokio::test]
async fn connect_decodes_snapshot_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("my schema.toml");
    SnapshotFile::new(Dialect::Sqlite, make_tables())
        .save(&path)
        .unwrap();

    let encoded = url::Url::from_file_path(&path).unwrap();
    assert!(encoded.path().contains("my%20schema.toml"));

    let url = format!("snapshot:{}", encoded.path());
    let automate = Automate::connect(&url, Config::new()).unwrap();
    assert_eq!(automate.dialect(), Dialect::Sqlite);
}
