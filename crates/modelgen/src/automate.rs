use crate::{FsWriter, Sequelize};

use modelgen_core::render::{GeneratedFile, RenderOptions};
use modelgen_core::schema::{Builder, Definitions, Dialect, RawTable};
use modelgen_core::write::WriteOptions;
use modelgen_core::{Config, Error, Introspector, Renderer, Result, Writer};

use std::sync::Arc;
use tokio::task::JoinSet;

/// Runs the whole pipeline: select tables, introspect them, build
/// definitions, render and write.
#[derive(Debug)]
pub struct Automate {
    config: Config,
    introspector: Arc<dyn Introspector>,
    renderer: Arc<dyn Renderer>,
    writer: Arc<dyn Writer>,
}

/// The result of a run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub definitions: Definitions,
    pub files: Vec<GeneratedFile>,
}

impl Automate {
    /// Creates a generator over `introspector`. Fails if `config` is invalid.
    pub fn new(introspector: impl Introspector, config: Config) -> Result<Automate> {
        Automate::from_arc(Arc::new(introspector), config)
    }

    /// Creates a generator over an already boxed introspector.
    pub fn from_boxed(introspector: Box<dyn Introspector>, config: Config) -> Result<Automate> {
        Automate::from_arc(Arc::from(introspector), config)
    }

    /// Creates a generator for the database at `url`, see [`crate::connect`].
    pub fn connect(url: &str, config: Config) -> Result<Automate> {
        // Reject bad options before touching the database
        config.validate()?;
        Automate::from_boxed(crate::connect(url)?, config)
    }

    fn from_arc(introspector: Arc<dyn Introspector>, config: Config) -> Result<Automate> {
        config.validate()?;

        Ok(Automate {
            config,
            introspector,
            renderer: Arc::new(Sequelize::new()),
            writer: Arc::new(FsWriter::new()),
        })
    }

    /// Replaces the built-in renderer.
    pub fn renderer(mut self, renderer: impl Renderer) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Replaces the filesystem writer.
    pub fn writer(mut self, writer: impl Writer) -> Self {
        self.writer = Arc::new(writer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The configured dialect, or the one the introspector reports.
    pub fn dialect(&self) -> Dialect {
        self.config
            .dialect
            .unwrap_or_else(|| self.introspector.dialect())
    }

    /// Names of the tables this run covers.
    pub async fn table_names(&self) -> Result<Vec<String>> {
        let all: Vec<String> = self
            .introspector
            .list_tables()
            .await?
            .into_iter()
            .map(|table| table.into_name())
            .collect();

        let selected = self.config.selection()?.apply(&all)?;

        tracing::debug!(tables = ?selected, "selected tables");
        Ok(selected)
    }

    /// Introspects every selected table.
    ///
    /// Tables are introspected concurrently. The first failure aborts the
    /// remaining work and is returned.
    pub async fn tables(&self) -> Result<Vec<RawTable>> {
        let names = self.table_names().await?;

        let mut tasks = JoinSet::new();
        for (i, name) in names.into_iter().enumerate() {
            let introspector = self.introspector.clone();
            tasks.spawn(async move {
                let table = introspect(&*introspector, name).await;
                (i, table)
            });
        }

        let mut tables = Vec::with_capacity(tasks.len());

        while let Some(joined) = tasks.join_next().await {
            let result = joined
                .map_err(Error::introspection)
                .and_then(|(i, table)| Ok((i, table?)));

            match result {
                Ok(entry) => tables.push(entry),
                Err(err) => {
                    tasks.abort_all();
                    return Err(err);
                }
            }
        }

        tables.sort_by_key(|(i, _)| *i);
        Ok(tables.into_iter().map(|(_, table)| table).collect())
    }

    /// Introspects and builds definitions, without rendering.
    pub async fn definitions(&self) -> Result<Definitions> {
        let tables = self.tables().await?;
        Builder::from_config(&self.config, self.dialect()).build(&tables)
    }

    /// Builds and renders every model, without writing.
    pub async fn generate(&self) -> Result<Generated> {
        let definitions = self.definitions().await?;

        let files = self
            .renderer
            .render(&definitions, &RenderOptions::from_config(&self.config))?;

        Ok(Generated { definitions, files })
    }

    /// Generates every model and writes the files.
    pub async fn run(&self) -> Result<Generated> {
        let generated = self.generate().await?;

        self.writer
            .write(&generated.files, &WriteOptions::from_config(&self.config))
            .await?;

        tracing::debug!(
            files = generated.files.len(),
            dir = %self.config.dir.display(),
            "wrote models"
        );

        Ok(generated)
    }
}

async fn introspect(introspector: &dyn Introspector, name: String) -> Result<RawTable> {
    let (columns, indexes, foreign_keys) = tokio::try_join!(
        introspector.describe_table(&name),
        introspector.show_indexes(&name),
        introspector.foreign_keys(&name),
    )
    .map_err(|err| err.context(modelgen_core::err!("introspecting table `{name}`")))?;

    Ok(RawTable {
        name,
        columns,
        indexes,
        foreign_keys,
    })
}
