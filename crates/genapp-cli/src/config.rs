//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the final
//! [`GenerationSettings`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. Execution file (`--exec`), for every key it contains
//! 2. CLI flags
//! 3. Environment variables (`GENAPP_MODELS`, `GENAPP_GENERATE__OUTPUT_DIR`, ...)
//! 4. Config file (`--config`, else the platform config dir)
//! 5. Built-in defaults

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use genapp_core::{application::GenerationSettings, domain::json::strip_comments};

use crate::cli::GenerateArgs;
use crate::error::{CliError, CliResult};

/// Model set name accepted in the execution file's `cmd`.
pub const DEFAULT_COMMAND: &str = "sqlapp";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults for `genapp generate`.
    pub generate: GenerateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub model_dir: PathBuf,
    pub output_dir: PathBuf,
    pub replace: bool,
    pub defines: BTreeMap<String, String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            model_dir: settings.model_dir,
            output_dir: settings.output_dir,
            replace: false,
            defines: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `GENAPP_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::from(Self::config_path()).required(false),
        };

        let built = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("GENAPP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration")?;

        let mut cfg: Self = built
            .try_deserialize()
            .context("invalid configuration")?;

        if let Ok(models) = std::env::var("GENAPP_MODELS") {
            if !models.is_empty() {
                cfg.generate.model_dir = PathBuf::from(models);
            }
        }

        Ok(cfg)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.genapp.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "genapp", "genapp")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".genapp.toml"))
    }
}

// ── Execution file ────────────────────────────────────────────────────────────

/// A saved generation run.
///
/// Every key is optional; keys that are present win over CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecFile {
    pub cmd: Option<String>,
    /// Schema path.
    pub data: Option<PathBuf>,
    pub debug: Option<bool>,
    pub force: Option<bool>,
    pub mdldir: Option<PathBuf>,
    pub noop: Option<bool>,
    pub outdir: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub replace: Option<bool>,
    /// Comma-separated `key=value` list.
    pub define: Option<String>,
}

impl ExecFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::ConfigError {
            message: format!("cannot read execution file {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&strip_comments(&text)).map_err(|e| CliError::ConfigError {
            message: format!("execution file {} is not valid: {}", path.display(), e),
            source: Some(Box::new(e)),
        })
    }
}

// ── Generate settings ─────────────────────────────────────────────────────────

/// Everything `genapp generate` needs, after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGenerate {
    pub schema: PathBuf,
    pub settings: GenerationSettings,
    pub debug: bool,
    pub quiet: bool,
}

/// Merge config, CLI flags and the execution file.
pub fn resolve_generate(
    args: &GenerateArgs,
    config: &AppConfig,
    exec: Option<&ExecFile>,
) -> CliResult<ResolvedGenerate> {
    let empty = ExecFile::default();
    let exec = exec.unwrap_or(&empty);

    if let Some(cmd) = exec.cmd.as_deref() {
        if cmd != DEFAULT_COMMAND {
            return Err(CliError::InvalidInput {
                message: format!(
                    "unknown generator '{}' in execution file (expected '{}')",
                    cmd, DEFAULT_COMMAND
                ),
                source: None,
            });
        }
    }

    let schema = exec
        .data
        .clone()
        .or_else(|| args.schema.clone())
        .ok_or_else(|| CliError::InvalidInput {
            message: "no schema file given".into(),
            source: None,
        })?;

    let mut defines = config.generate.defines.clone();
    for raw in &args.defines {
        let (k, v) = parse_define(raw)?;
        defines.insert(k, v);
    }
    if let Some(list) = exec.define.as_deref() {
        for raw in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (k, v) = parse_define(raw)?;
            defines.insert(k, v);
        }
    }

    let settings = GenerationSettings {
        model_dir: exec
            .mdldir
            .clone()
            .or_else(|| args.model_dir.clone())
            .unwrap_or_else(|| config.generate.model_dir.clone()),
        output_dir: exec
            .outdir
            .clone()
            .or_else(|| args.output_dir.clone())
            .unwrap_or_else(|| config.generate.output_dir.clone()),
        replace: exec
            .replace
            .unwrap_or(args.replace || config.generate.replace),
        noop: exec.noop.unwrap_or(args.noop),
        force: exec.force.unwrap_or(args.force),
        defines,
    };

    Ok(ResolvedGenerate {
        schema,
        settings,
        debug: exec.debug.unwrap_or(args.debug),
        quiet: exec.quiet.unwrap_or(false),
    })
}

/// Split `key=value`. The value may itself contain `=`.
pub fn parse_define(raw: &str) -> CliResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(CliError::InvalidDefine {
            define: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.generate.model_dir, PathBuf::from("./models"));
        assert_eq!(cfg.generate.output_dir, PathBuf::from("/tmp"));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("genapp.toml");
        std::fs::write(
            &path,
            "[generate]\noutput_dir = \"/srv/out\"\nreplace = true\n\n[generate.defines]\nAuthor = \"Ada\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.generate.output_dir, PathBuf::from("/srv/out"));
        assert!(cfg.generate.replace);
        assert_eq!(cfg.generate.defines.get("Author").map(String::as_str), Some("Ada"));
    }

    #[test]
    fn missing_explicit_config_file_fails() {
        let missing = PathBuf::from("/definitely/not/here/genapp.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }

    #[test]
    fn parse_define_variants() {
        assert_eq!(
            parse_define("Author=Ada").unwrap(),
            ("Author".to_string(), "Ada".to_string())
        );
        assert_eq!(parse_define("url=a=b").unwrap().1, "a=b");
        assert!(matches!(
            parse_define("novalue"),
            Err(CliError::InvalidDefine { .. })
        ));
        assert!(parse_define("=x").is_err());
    }

    #[test]
    fn flags_override_config() {
        let args = GenerateArgs {
            schema: Some("s.json".into()),
            output_dir: Some("/flag/out".into()),
            defines: vec!["A=flag".into()],
            ..GenerateArgs::default()
        };
        let mut config = AppConfig::default();
        config.generate.defines.insert("A".into(), "config".into());
        config.generate.defines.insert("B".into(), "config".into());

        let resolved = resolve_generate(&args, &config, None).unwrap();
        assert_eq!(resolved.schema, PathBuf::from("s.json"));
        assert_eq!(resolved.settings.output_dir, PathBuf::from("/flag/out"));
        assert_eq!(resolved.settings.model_dir, PathBuf::from("./models"));
        assert_eq!(resolved.settings.defines["A"], "flag");
        assert_eq!(resolved.settings.defines["B"], "config");
    }

    #[test]
    fn exec_file_overrides_flags() {
        let args = GenerateArgs {
            schema: Some("flag.json".into()),
            output_dir: Some("/flag/out".into()),
            replace: true,
            defines: vec!["A=flag".into()],
            ..GenerateArgs::default()
        };
        let exec: ExecFile = serde_json::from_str(
            r#"{"cmd": "sqlapp", "data": "exec.json", "outdir": "/exec/out",
                "replace": false, "debug": true, "define": "A=exec, C=3"}"#,
        )
        .unwrap();

        let resolved = resolve_generate(&args, &AppConfig::default(), Some(&exec)).unwrap();
        assert_eq!(resolved.schema, PathBuf::from("exec.json"));
        assert_eq!(resolved.settings.output_dir, PathBuf::from("/exec/out"));
        assert!(!resolved.settings.replace);
        assert!(resolved.debug);
        assert_eq!(resolved.settings.defines["A"], "exec");
        assert_eq!(resolved.settings.defines["C"], "3");
    }

    #[test]
    fn missing_schema_is_invalid_input() {
        let err = resolve_generate(&GenerateArgs::default(), &AppConfig::default(), None)
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn unknown_exec_command_is_rejected() {
        let exec = ExecFile {
            cmd: Some("webapp".into()),
            data: Some("x.json".into()),
            ..ExecFile::default()
        };
        assert!(resolve_generate(&GenerateArgs::default(), &AppConfig::default(), Some(&exec)).is_err());
    }

    #[test]
    fn exec_file_load_accepts_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, "// saved run\n{\"data\": \"m.json\", \"noop\": true}").unwrap();
        let exec = ExecFile::load(&path).unwrap();
        assert_eq!(exec.data, Some(PathBuf::from("m.json")));
        assert_eq!(exec.noop, Some(true));
    }
}
