//! File definitions and the generation plan derived from them.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::common::{Permissions, RelativePath, title_case};
use super::schema::{Database, TableRef};
use crate::domain::DomainError;

/// How a model becomes an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenMode {
    /// Rendered through the template renderer.
    Text,
    /// Copied byte for byte.
    Copy,
    /// Every file under the model directory copied into the output directory.
    CopyDir,
}

impl fmt::Display for GenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Copy => "copy",
            Self::CopyDir => "copy-dir",
        };
        f.write_str(s)
    }
}

/// Whether a definition yields one task or one per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationGroup {
    Once,
    PerTable,
}

/// One entry of the static generation table.
///
/// `dir` and `file` may contain `${DbName}` and `${TblName}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDefn {
    pub model: &'static str,
    pub dir: &'static str,
    pub file: &'static str,
    pub mode: GenMode,
    pub perms: Permissions,
    pub group: GenerationGroup,
}

impl FileDefn {
    const fn new(
        model: &'static str,
        dir: &'static str,
        file: &'static str,
        mode: GenMode,
        perms: Permissions,
        group: GenerationGroup,
    ) -> Self {
        Self {
            model,
            dir,
            file,
            mode,
            perms,
            group,
        }
    }
}

const RW: Permissions = Permissions::read_write();
const RWX: Permissions = Permissions::executable();

/// Everything the `sqlapp` model set produces, in generation order.
pub const FILE_DEFNS: &[FileDefn] = &[
    FileDefn::new("bld.sh.txt", "", "b.sh", GenMode::Text, RWX, GenerationGroup::Once),
    FileDefn::new("static.txt", "static", "README.txt", GenMode::Copy, RW, GenerationGroup::Once),
    FileDefn::new("tst.sh.txt", "src", "t.sh", GenMode::Copy, RWX, GenerationGroup::Once),
    FileDefn::new("tst.sh.txt", "src/hndlr${DbName}", "t.sh", GenMode::Copy, RWX, GenerationGroup::Once),
    FileDefn::new("tst.sh.txt", "src/io${DbName}", "t.sh", GenMode::Copy, RWX, GenerationGroup::Once),
    FileDefn::new("form.html", "html", "form.html", GenMode::Copy, RW, GenerationGroup::Once),
    FileDefn::new(
        "form.html.tmpl.txt",
        "tmpl",
        "${DbName}.${TblName}.form.gohtml",
        GenMode::Text,
        RW,
        GenerationGroup::PerTable,
    ),
    FileDefn::new(
        "list.html.tmpl.txt",
        "tmpl",
        "${DbName}.${TblName}.list.gohtml",
        GenMode::Text,
        RW,
        GenerationGroup::PerTable,
    ),
    FileDefn::new(
        "main.menu.html.tmpl.txt",
        "html",
        "${DbName}.menu.html",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new("main.go.tmpl.txt", "src", "main.go", GenMode::Text, RW, GenerationGroup::Once),
    FileDefn::new(
        "mainExec.go.tmpl.txt",
        "src",
        "mainExec.go",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new(
        "handlers.go.tmpl.txt",
        "src/hndlr${DbName}",
        "hndlr${DbName}.go",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new(
        "handlers_test.go.tmpl.txt",
        "src/hndlr${DbName}",
        "hndlr${DbName}_test.go",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new(
        "handlers.table.go.tmpl.txt",
        "src/hndlr${DbName}",
        "${TblName}.go",
        GenMode::Text,
        RW,
        GenerationGroup::PerTable,
    ),
    FileDefn::new(
        "io.go.tmpl.txt",
        "src/io${DbName}",
        "io${DbName}.go",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new(
        "io_test.go.tmpl.txt",
        "src/io${DbName}",
        "io${DbName}_test.go",
        GenMode::Text,
        RW,
        GenerationGroup::Once,
    ),
    FileDefn::new(
        "io.table.go.tmpl.txt",
        "src/io${DbName}",
        "${TblName}.go",
        GenMode::Text,
        RW,
        GenerationGroup::PerTable,
    ),
    FileDefn::new("util.go.txt", "src/util", "util.go", GenMode::Copy, RW, GenerationGroup::Once),
    FileDefn::new("docker", "docker", "", GenMode::CopyDir, RW, GenerationGroup::Once),
];

/// Substitute `${DbName}` and `${TblName}` with the title-cased names.
///
/// `${TblName}` is left untouched when no table is given.
pub fn expand_placeholders(pattern: &str, db_name: &str, table_name: Option<&str>) -> String {
    let mut out = pattern.replace("${DbName}", &title_case(db_name));
    if let Some(table) = table_name {
        out = out.replace("${TblName}", &title_case(table));
    }
    out
}

/// One unit of work: produce `output` from `model`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationTask {
    /// Model name as listed in the definition table.
    pub model: String,
    /// Output path relative to the output directory.
    #[serde(serialize_with = "serialize_relative")]
    pub output: RelativePath,
    pub mode: GenMode,
    #[serde(serialize_with = "serialize_perms")]
    pub permissions: Permissions,
    /// Set for per-table tasks.
    #[serde(skip)]
    pub table: Option<TableRef>,
}

impl GenerationTask {
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(self.output.as_path())
    }
}

fn serialize_relative<S: serde::Serializer>(p: &RelativePath, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(p)
}

fn serialize_perms<S: serde::Serializer>(p: &Permissions, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(p)
}

/// Expand `defns` against `db`.
///
/// Definitions are taken in order; a per-table definition yields one task
/// per table in declaration order before the next definition is visited.
pub fn plan(db: &Database, defns: &[FileDefn]) -> Result<Vec<GenerationTask>, DomainError> {
    let mut tasks = Vec::new();
    for defn in defns {
        match defn.group {
            GenerationGroup::Once => tasks.push(task_for(db, defn, None)?),
            GenerationGroup::PerTable => {
                for ti in 0..db.tables.len() {
                    tasks.push(task_for(db, defn, Some(TableRef(ti)))?);
                }
            }
        }
    }
    Ok(tasks)
}

fn task_for(
    db: &Database,
    defn: &FileDefn,
    table: Option<TableRef>,
) -> Result<GenerationTask, DomainError> {
    let table_name = table
        .and_then(|at| db.table_at(at))
        .map(|t| t.name.as_str());
    let dir = expand_placeholders(defn.dir, &db.name, table_name);
    let file = expand_placeholders(defn.file, &db.name, table_name);

    let joined = if file.is_empty() {
        PathBuf::from(dir)
    } else {
        Path::new(&dir).join(file)
    };
    let output = RelativePath::try_new(joined).map_err(|p| DomainError::InvalidOutputPath {
        path: p.display().to_string(),
    })?;

    Ok(GenerationTask {
        model: defn.model.to_string(),
        output,
        mode: defn.mode,
        permissions: defn.perms,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Field, Table};

    fn movies() -> Database {
        Database::new("movies", "sqlite")
            .with_table(Table::new("actor").with_field(Field::new("Id", "integer").primary_key()))
            .with_table(Table::new("film").with_field(Field::new("Id", "integer").primary_key()))
    }

    #[test]
    fn db_name_is_title_cased_in_output_path() {
        let defn = FileDefn::new(
            "fn.txt",
            "",
            "fn_${DbName}.txt",
            GenMode::Text,
            RW,
            GenerationGroup::Once,
        );
        let tasks = plan(&movies(), &[defn]).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].output_path(Path::new("/tmp/testgen")),
            PathBuf::from("/tmp/testgen/fn_Movies.txt")
        );
    }

    #[test]
    fn expand_both_placeholders() {
        assert_eq!(
            expand_placeholders("${DbName}.${TblName}.form.gohtml", "movies", Some("film")),
            "Movies.Film.form.gohtml"
        );
        assert_eq!(expand_placeholders("${TblName}.go", "movies", None), "${TblName}.go");
    }

    #[test]
    fn per_table_tasks_follow_declaration_order() {
        let tasks = plan(&movies(), FILE_DEFNS).unwrap();
        let forms: Vec<String> = tasks
            .iter()
            .filter(|t| t.model == "form.html.tmpl.txt")
            .map(|t| t.output.to_string())
            .collect();
        assert_eq!(
            forms,
            vec!["tmpl/Movies.Actor.form.gohtml", "tmpl/Movies.Film.form.gohtml"]
        );
        assert_eq!(tasks[6].table, Some(TableRef(0)));
        assert_eq!(tasks[7].table, Some(TableRef(1)));
    }

    #[test]
    fn full_plan_size_and_shape() {
        let tasks = plan(&movies(), FILE_DEFNS).unwrap();
        // 15 once-definitions plus 4 per-table definitions over 2 tables.
        assert_eq!(tasks.len(), 15 + 4 * 2);
        assert_eq!(tasks[0].output.to_string(), "b.sh");
        assert!(tasks[0].permissions.executable_flag());
        assert_eq!(tasks[3].output.to_string(), "src/hndlrMovies/t.sh");

        let docker = tasks.last().unwrap();
        assert_eq!(docker.mode, GenMode::CopyDir);
        assert_eq!(docker.output.to_string(), "docker");
    }

    #[test]
    fn names_that_escape_the_root_are_rejected() {
        let db = Database::new("..", "sqlite")
            .with_table(Table::new("t").with_field(Field::new("Id", "integer").primary_key()));
        let defn = FileDefn::new("x", "${DbName}", "a.txt", GenMode::Copy, RW, GenerationGroup::Once);
        assert!(matches!(
            plan(&db, &[defn]),
            Err(DomainError::InvalidOutputPath { .. })
        ));
    }
}
