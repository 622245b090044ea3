//! Generator Service - main application orchestrator.
//!
//! Drives a run end to end:
//! 1. Load, validate and resolve the schema
//! 2. Plan the output files
//! 3. Execute each task through the filesystem and renderer ports
//!
//! Schema errors stop the run before anything is written. Per-file errors
//! are collected into the [`GenerationReport`] and the remaining tasks still
//! run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{
        Database, DomainError, DomainValidator, FILE_DEFNS, FileDefn, GenMode, GenerationTask,
        PluginRegistry, RenderContext, entities, json,
    },
    error::{GenappError, GenappResult},
};

/// Model files live under `<model_dir>/sqlapp/`.
pub const MODEL_SET: &str = "sqlapp";

/// Knobs for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub model_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Overwrite files that already exist.
    pub replace: bool,
    /// Plan and check only; write nothing.
    pub noop: bool,
    /// Remove the output directory before generating.
    pub force: bool,
    /// Extra template variables.
    pub defines: BTreeMap<String, String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("./models"),
            output_dir: PathBuf::from("/tmp"),
            replace: false,
            noop: false,
            force: false,
            defines: BTreeMap::new(),
        }
    }
}

/// An output file that was not produced.
///
/// A directory copy can fail several files of the same task; each gets its
/// own entry.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    pub task: GenerationTask,
    /// Absolute output path of the file that failed.
    pub path: PathBuf,
    pub error: GenappError,
}

/// Outcome of [`GeneratorService::execute`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub dry_run: bool,
    /// Absolute output paths written (or that would be, on a dry run).
    pub written: Vec<PathBuf>,
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<TaskFailure>,
}

impl GenerationReport {
    fn new(dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            dry_run,
            written: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files attempted: written plus failed.
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    fn record_failure(&mut self, task: &GenerationTask, path: PathBuf, error: GenappError) {
        warn!(path = %path.display(), error = %error, "File failed");
        self.failures.push(TaskFailure {
            task: task.clone(),
            path,
            error,
        });
    }
}

fn serialize_failures<S: serde::Serializer>(
    failures: &[TaskFailure],
    s: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeSeq;
    let mut seq = s.serialize_seq(Some(failures.len()))?;
    for f in failures {
        seq.serialize_element(&BTreeMap::from([
            ("output", f.task.output.to_string()),
            ("path", f.path.display().to_string()),
            ("error", f.error.to_string()),
        ]))?;
    }
    seq.end()
}

/// Main generation service.
pub struct GeneratorService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    registry: PluginRegistry,
}

impl GeneratorService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        registry: PluginRegistry,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            registry,
        }
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Read and decode a schema file. No validation.
    #[instrument(skip_all, fields(schema = %path.display()))]
    pub fn load_schema(&self, path: &Path) -> GenappResult<Database> {
        let text = self.filesystem.read_to_string(path)?;
        let db = json::parse_schema(&text)?;
        debug!(tables = db.tables.len(), "Schema decoded");
        Ok(db)
    }

    /// Load, validate (fail-fast) and resolve the dialect plugin.
    #[instrument(skip_all, fields(schema = %path.display()))]
    pub fn prepare(&self, path: &Path) -> GenappResult<Database> {
        let mut db = self.load_schema(path)?;
        DomainValidator::validate(&db)?;
        db.resolve_plugin(&self.registry)?;
        info!(database = %db.name, dialect = %db.sql_type, "Schema ready");
        Ok(db)
    }

    /// Every problem with a schema: all validation violations, then the
    /// plugin resolution error if validation was clean.
    pub fn check(&self, path: &Path) -> GenappResult<Vec<DomainError>> {
        let mut db = self.load_schema(path)?;
        let mut problems = DomainValidator::violations(&db);
        if problems.is_empty() {
            if let Err(e) = db.resolve_plugin(&self.registry) {
                problems.push(e);
            }
        }
        Ok(problems)
    }

    pub fn plan(&self, db: &Database) -> GenappResult<Vec<GenerationTask>> {
        self.plan_with(db, FILE_DEFNS)
    }

    pub fn plan_with(&self, db: &Database, defns: &[FileDefn]) -> GenappResult<Vec<GenerationTask>> {
        Ok(entities::plan(db, defns)?)
    }

    /// Run `tasks` in order and report per-task outcomes.
    #[instrument(
        skip_all,
        fields(
            database = %db.name,
            tasks = tasks.len(),
            output_dir = %settings.output_dir.display()
        )
    )]
    pub fn execute(
        &self,
        db: &Database,
        tasks: &[GenerationTask],
        settings: &GenerationSettings,
    ) -> GenappResult<GenerationReport> {
        let base = RenderContext::for_database(db, &settings.defines)?;
        let mut report = GenerationReport::new(settings.noop);

        if settings.force && self.filesystem.exists(&settings.output_dir) {
            if settings.noop {
                info!("Would remove output directory");
            } else {
                warn!("Removing output directory before generation");
                self.filesystem.remove_dir_all(&settings.output_dir)?;
            }
        }

        for task in tasks {
            self.run_task(db, &base, task, settings, &mut report);
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "Generation finished"
        );
        Ok(report)
    }

    /// Prepare, plan and execute in one go.
    pub fn generate(
        &self,
        schema: &Path,
        settings: &GenerationSettings,
    ) -> GenappResult<GenerationReport> {
        let db = self.prepare(schema)?;
        let tasks = self.plan(&db)?;
        self.execute(&db, &tasks, settings)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_task(
        &self,
        db: &Database,
        base: &RenderContext,
        task: &GenerationTask,
        settings: &GenerationSettings,
        report: &mut GenerationReport,
    ) {
        let target = task.output_path(&settings.output_dir);
        let model = match self.resolve_model(&task.model, task.mode, &settings.model_dir) {
            Ok(model) => model,
            Err(error) => return report.record_failure(task, target, error),
        };

        let outcome = match task.mode {
            GenMode::Copy => self.copy_file(&model, &target, task, settings),
            GenMode::Text => self.render_file(db, base, &model, &target, task, settings),
            GenMode::CopyDir => return self.copy_dir(&model, &target, task, settings, report),
        };
        match outcome {
            Ok(()) => report.written.push(target),
            Err(error) => report.record_failure(task, target, error),
        }
    }

    fn copy_file(
        &self,
        model: &Path,
        target: &Path,
        task: &GenerationTask,
        settings: &GenerationSettings,
    ) -> GenappResult<()> {
        self.check_overwrite(target, settings)?;
        let content = self.filesystem.read_bytes(model)?;
        self.emit(target, &content, task, settings)
    }

    fn render_file(
        &self,
        db: &Database,
        base: &RenderContext,
        model: &Path,
        target: &Path,
        task: &GenerationTask,
        settings: &GenerationSettings,
    ) -> GenappResult<()> {
        self.check_overwrite(target, settings)?;
        let text = self.filesystem.read_to_string(model)?;
        let ctx = match task.table.and_then(|at| db.table_view(at)) {
            Some(view) => base.with_table(&view)?,
            None => base.clone(),
        };
        let content = self.renderer.render(&text, &ctx).map_err(|e| match e {
            GenappError::Application(ApplicationError::RenderingFailed { reason, .. }) => {
                ApplicationError::RenderingFailed {
                    model: task.model.clone(),
                    reason,
                }
                .into()
            }
            other => other,
        })?;
        self.emit(target, content.as_bytes(), task, settings)
    }

    /// Each file in the directory succeeds or fails on its own.
    fn copy_dir(
        &self,
        model: &Path,
        target: &Path,
        task: &GenerationTask,
        settings: &GenerationSettings,
        report: &mut GenerationReport,
    ) {
        let files = match self.filesystem.list_files(model) {
            Ok(files) => files,
            Err(error) => return report.record_failure(task, target.to_path_buf(), error),
        };
        for rel in files {
            let out = target.join(&rel);
            match self.copy_file(&model.join(&rel), &out, task, settings) {
                Ok(()) => report.written.push(out),
                Err(error) => report.record_failure(task, out, error),
            }
        }
    }

    /// Absolute names are used as given. Everything else comes from the
    /// model set, never from the working directory.
    fn resolve_model(&self, name: &str, mode: GenMode, model_dir: &Path) -> GenappResult<PathBuf> {
        let present = |p: &Path| match mode {
            GenMode::CopyDir => self.filesystem.is_dir(p),
            GenMode::Text | GenMode::Copy => self.filesystem.is_file(p),
        };

        let path = if Path::new(name).is_absolute() {
            PathBuf::from(name)
        } else {
            model_dir.join(MODEL_SET).join(name)
        };
        if present(&path) {
            return Ok(path);
        }
        Err(ApplicationError::ModelNotFound {
            name: name.to_string(),
            searched: path,
        }
        .into())
    }

    fn check_overwrite(&self, target: &Path, settings: &GenerationSettings) -> GenappResult<()> {
        if !settings.replace && self.filesystem.exists(target) {
            return Err(ApplicationError::OverwriteNotPermitted {
                path: target.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    fn emit(
        &self,
        target: &Path,
        content: &[u8],
        task: &GenerationTask,
        settings: &GenerationSettings,
    ) -> GenappResult<()> {
        if settings.noop {
            info!(path = %target.display(), "Would write");
            return Ok(());
        }

        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_bytes(target, content)?;
        if task.permissions.executable_flag() {
            self.filesystem.set_permissions(target, task.permissions)?;
        }
        debug!(path = %target.display(), mode = %task.mode, "Wrote file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::MockTemplateRenderer;
    use crate::domain::{GenerationGroup, Permissions};

    /// Minimal in-memory filesystem for service tests.
    #[derive(Clone, Default)]
    struct FakeFs {
        files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
        modes: Arc<Mutex<BTreeMap<PathBuf, u32>>>,
    }

    impl FakeFs {
        fn with(self, path: &str, content: impl AsRef<[u8]>) -> Self {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.as_ref().to_vec());
            self
        }

        fn get(&self, path: &str) -> Option<String> {
            self.get_bytes(path).map(|raw| String::from_utf8(raw).unwrap())
        }

        fn get_bytes(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl Filesystem for FakeFs {
        fn create_dir_all(&self, _path: &Path) -> GenappResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> GenappResult<()> {
            self.write_bytes(path, content.as_bytes())
        }

        fn write_bytes(&self, path: &Path, content: &[u8]) -> GenappResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_vec());
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> GenappResult<String> {
            let raw = self.read_bytes(path)?;
            String::from_utf8(raw).map_err(|e| {
                ApplicationError::ReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
                .into()
            })
        }

        fn read_bytes(&self, path: &Path) -> GenappResult<Vec<u8>> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
                ApplicationError::ReadFailed {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
        }

        fn set_permissions(&self, path: &Path, permissions: Permissions) -> GenappResult<()> {
            self.modes
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), permissions.mode());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.is_file(path) || self.is_dir(path)
        }

        fn is_file(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.files
                .lock()
                .unwrap()
                .keys()
                .any(|k| k != path && k.starts_with(path))
        }

        fn remove_dir_all(&self, path: &Path) -> GenappResult<()> {
            self.files.lock().unwrap().retain(|k, _| !k.starts_with(path));
            Ok(())
        }

        fn list_files(&self, dir: &Path) -> GenappResult<Vec<PathBuf>> {
            Ok(self
                .files
                .lock()
                .unwrap()
                .keys()
                .filter_map(|k| k.strip_prefix(dir).ok().map(Path::to_path_buf))
                .collect())
        }
    }

    const SCHEMA: &str = r#"{
        "Name": "movies", "SqlType": "sqlite",
        "Tables": [
            {"Name": "actor", "Fields": [{"Name": "Id", "TypeDef": "integer", "PrimaryKey": true}]},
            {"Name": "film", "Fields": [{"Name": "Id", "TypeDef": "integer", "PrimaryKey": true}]}
        ]
    }"#;

    const DEFNS: &[FileDefn] = &[
        FileDefn {
            model: "run.sh.txt",
            dir: "",
            file: "run.sh",
            mode: GenMode::Copy,
            perms: Permissions::executable(),
            group: GenerationGroup::Once,
        },
        FileDefn {
            model: "table.txt",
            dir: "src/${DbName}",
            file: "${TblName}.go",
            mode: GenMode::Text,
            perms: Permissions::read_write(),
            group: GenerationGroup::PerTable,
        },
        FileDefn {
            model: "docker",
            dir: "docker",
            file: "",
            mode: GenMode::CopyDir,
            perms: Permissions::read_write(),
            group: GenerationGroup::Once,
        },
    ];

    fn models(fs: FakeFs) -> FakeFs {
        fs.with("/schema.json", SCHEMA)
            .with("/m/sqlapp/run.sh.txt", "#!/bin/sh\n")
            .with("/m/sqlapp/table.txt", "table [[.TblName]]")
            .with("/m/sqlapp/docker/compose.yml", "services: {}\n")
    }

    fn settings() -> GenerationSettings {
        GenerationSettings {
            model_dir: PathBuf::from("/m"),
            output_dir: PathBuf::from("/out"),
            ..GenerationSettings::default()
        }
    }

    fn echo_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|text, ctx| {
            Ok(text.replace("[[.TblName]]", ctx.get("TblName").unwrap_or("?")))
        });
        renderer
    }

    fn service(fs: &FakeFs, renderer: MockTemplateRenderer) -> GeneratorService {
        GeneratorService::new(
            Box::new(fs.clone()),
            Box::new(renderer),
            PluginRegistry::bootstrap(),
        )
    }

    fn run(svc: &GeneratorService, settings: &GenerationSettings) -> GenerationReport {
        let db = svc.prepare(Path::new("/schema.json")).unwrap();
        let tasks = svc.plan_with(&db, DEFNS).unwrap();
        svc.execute(&db, &tasks, settings).unwrap()
    }

    #[test]
    fn writes_every_task() {
        let fs = models(FakeFs::default());
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert!(report.is_success());
        assert_eq!(report.written.len(), 4);
        assert_eq!(fs.get("/out/src/Movies/Actor.go").as_deref(), Some("table Actor"));
        assert_eq!(fs.get("/out/src/Movies/Film.go").as_deref(), Some("table Film"));
        assert_eq!(fs.get("/out/docker/compose.yml").as_deref(), Some("services: {}\n"));
        assert_eq!(
            fs.modes.lock().unwrap().get(Path::new("/out/run.sh")),
            Some(&0o755)
        );
    }

    #[test]
    fn existing_file_is_kept_and_reported() {
        let fs = models(FakeFs::default()).with("/out/src/Movies/Actor.go", "hand edited");
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            GenappError::Application(ApplicationError::OverwriteNotPermitted { .. })
        ));
        assert_eq!(fs.get("/out/src/Movies/Actor.go").as_deref(), Some("hand edited"));
        // The rest of the run carries on.
        assert_eq!(fs.get("/out/src/Movies/Film.go").as_deref(), Some("table Film"));
    }

    #[test]
    fn replace_overwrites() {
        let fs = models(FakeFs::default()).with("/out/src/Movies/Actor.go", "hand edited");
        let svc = service(&fs, echo_renderer());
        let report = run(
            &svc,
            &GenerationSettings {
                replace: true,
                ..settings()
            },
        );
        assert!(report.is_success());
        assert_eq!(fs.get("/out/src/Movies/Actor.go").as_deref(), Some("table Actor"));
    }

    #[test]
    fn noop_writes_nothing() {
        let fs = models(FakeFs::default());
        let svc = service(&fs, echo_renderer());
        let report = run(
            &svc,
            &GenerationSettings {
                noop: true,
                ..settings()
            },
        );
        assert!(report.dry_run);
        assert_eq!(report.written.len(), 4);
        assert!(fs.get("/out/run.sh").is_none());
    }

    #[test]
    fn force_clears_output_dir_first() {
        let fs = models(FakeFs::default()).with("/out/stale.txt", "old");
        let svc = service(&fs, echo_renderer());
        let report = run(
            &svc,
            &GenerationSettings {
                force: true,
                ..settings()
            },
        );
        assert!(report.is_success());
        assert!(fs.get("/out/stale.txt").is_none());
    }

    #[test]
    fn missing_model_fails_only_its_task() {
        let fs = FakeFs::default()
            .with("/schema.json", SCHEMA)
            .with("/m/sqlapp/table.txt", "x")
            .with("/m/sqlapp/docker/a", "a");
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            GenappError::Application(ApplicationError::ModelNotFound { .. })
        ));
        assert_eq!(report.written.len(), 3);
    }

    #[test]
    fn relative_names_never_read_the_working_directory() {
        // Same relative names as the models, outside the model set.
        let fs = models(FakeFs::default())
            .with("run.sh.txt", "echo local\n")
            .with("docker/secrets.env", "PW=hunter2\n");
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert!(report.is_success());
        assert_eq!(fs.get("/out/run.sh").as_deref(), Some("#!/bin/sh\n"));
        assert_eq!(fs.get("/out/docker/compose.yml").as_deref(), Some("services: {}\n"));
        assert!(fs.get("/out/docker/secrets.env").is_none());
    }

    #[test]
    fn absolute_model_names_are_used_as_given() {
        let fs = FakeFs::default().with("/elsewhere/run.sh", "#!/bin/sh\nexit 0\n");
        let svc = service(&fs, MockTemplateRenderer::new());
        let found = svc
            .resolve_model("/elsewhere/run.sh", GenMode::Copy, Path::new("/m"))
            .unwrap();
        assert_eq!(found, PathBuf::from("/elsewhere/run.sh"));

        let err = svc
            .resolve_model("run.sh", GenMode::Copy, Path::new("/m"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenappError::Application(ApplicationError::ModelNotFound { ref searched, .. })
                if searched == Path::new("/m/sqlapp/run.sh")
        ));
    }

    #[test]
    fn copies_binary_files_byte_for_byte() {
        let icon: [u8; 7] = [0x00, 0x00, 0x01, 0x00, 0xff, 0xfe, 0x89];
        let fs = models(FakeFs::default())
            .with("/m/sqlapp/run.sh.txt", [0xff, 0xfe, b'#', b'!'])
            .with("/m/sqlapp/docker/static/favicon.ico", icon);
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(
            fs.get_bytes("/out/docker/static/favicon.ico").as_deref(),
            Some(&icon[..])
        );
        assert_eq!(
            fs.get_bytes("/out/run.sh").as_deref(),
            Some(&[0xff, 0xfe, b'#', b'!'][..])
        );
    }

    #[test]
    fn directory_copy_carries_on_past_an_existing_file() {
        let fs = models(FakeFs::default())
            .with("/m/sqlapp/docker/db/Dockerfile", "FROM scratch\n")
            .with("/out/docker/db/Dockerfile", "hand edited");
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("/out/docker/db/Dockerfile"));
        assert!(matches!(
            report.failures[0].error,
            GenappError::Application(ApplicationError::OverwriteNotPermitted { .. })
        ));
        assert!(report.written.contains(&PathBuf::from("/out/docker/compose.yml")));
        assert_eq!(fs.get("/out/docker/compose.yml").as_deref(), Some("services: {}\n"));
        assert_eq!(fs.get("/out/docker/db/Dockerfile").as_deref(), Some("hand edited"));
        assert_eq!(report.attempted(), 5);
    }

    #[test]
    fn failures_serialize_with_their_path() {
        let fs = models(FakeFs::default()).with("/out/run.sh", "old");
        let svc = service(&fs, echo_renderer());
        let report = run(&svc, &settings());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"][0]["output"], "run.sh");
        assert_eq!(json["failures"][0]["path"], "/out/run.sh");
    }

    #[test]
    fn rendering_errors_name_the_model() {
        let fs = models(FakeFs::default());
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|_, _| {
            Err(ApplicationError::RenderingFailed {
                model: String::new(),
                reason: "unknown key 'Nope'".into(),
            }
            .into())
        });
        let svc = service(&fs, renderer);
        let report = run(&svc, &settings());

        assert_eq!(report.failures.len(), 2);
        assert!(
            report.failures[0]
                .error
                .to_string()
                .contains("rendering table.txt failed")
        );
    }

    #[test]
    fn invalid_schema_stops_before_writing() {
        let fs = FakeFs::default().with("/schema.json", r#"{"Name": "", "SqlType": "sqlite"}"#);
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().never();
        let svc = service(&fs, renderer);

        let err = svc
            .generate(Path::new("/schema.json"), &settings())
            .unwrap_err();
        assert!(matches!(
            err,
            GenappError::Domain(DomainError::MissingDatabaseName)
        ));
        assert_eq!(fs.files.lock().unwrap().len(), 1);
    }

    #[test]
    fn check_collects_all_violations() {
        let fs = FakeFs::default().with(
            "/schema.json",
            r#"{"Name": "", "SqlType": "oracle", "Tables": []}"#,
        );
        let svc = service(&fs, MockTemplateRenderer::new());
        let problems = svc.check(Path::new("/schema.json")).unwrap();
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn check_reports_resolution_errors() {
        let fs = FakeFs::default().with(
            "/schema.json",
            r#"{"Name": "x", "SqlType": "sqlite", "Tables": [
                {"Name": "t", "Fields": [{"Name": "a", "TypeDef": "bogus", "PrimaryKey": true}]}
            ]}"#,
        );
        let svc = service(&fs, MockTemplateRenderer::new());
        let problems = svc.check(Path::new("/schema.json")).unwrap();
        assert!(matches!(problems[..], [DomainError::UnknownFieldType { .. }]));
    }
}
