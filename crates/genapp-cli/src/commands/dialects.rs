//! `genapp dialects`: list the registered SQL dialects.

use serde::Serialize;

use genapp_core::domain::{Plugin, PluginRegistry};

use crate::{
    cli::{DialectsArgs, DialectsFormat},
    error::CliResult,
    output::OutputManager,
};

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectInfo {
    pub name: &'static str,
    pub driver: &'static str,
    pub server: &'static str,
    pub port: &'static str,
    pub user: &'static str,
    /// Connections must select the database with a `USE` statement.
    pub needs_use: bool,
    /// The generated scripts create the database themselves.
    pub creates_database: bool,
    pub docker_image: Option<&'static str>,
}

impl DialectInfo {
    fn from_plugin(plugin: &dyn Plugin) -> Self {
        Self {
            name: plugin.name(),
            driver: plugin.driver_name(),
            server: plugin.default_server(),
            port: plugin.default_port(),
            user: plugin.default_user(),
            needs_use: plugin.needs_use(),
            creates_database: plugin.creates_database(),
            docker_image: plugin.docker_image(),
        }
    }
}

/// Rows sorted by dialect name.
pub fn collect(registry: &PluginRegistry) -> Vec<DialectInfo> {
    let mut rows: Vec<_> = registry
        .plugins()
        .map(|p| DialectInfo::from_plugin(p.as_ref()))
        .collect();
    rows.sort_by_key(|r| r.name);
    rows
}

pub fn execute(args: DialectsArgs, output: OutputManager) -> CliResult<()> {
    let rows = collect(&PluginRegistry::bootstrap());

    if args.format == DialectsFormat::Json || output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    output.header(&format!(
        "{:<10} {:<10} {:<12} {:<6} {:<6} {:<4} {:<9} {}",
        "DIALECT", "DRIVER", "SERVER", "PORT", "USER", "USE", "CREATE DB", "DOCKER IMAGE"
    ))?;
    for row in &rows {
        output.print(&format!(
            "{:<10} {:<10} {:<12} {:<6} {:<6} {:<4} {:<9} {}",
            row.name,
            row.driver,
            row.server,
            row.port,
            row.user,
            yes_no(row.needs_use),
            yes_no(row.creates_database),
            row.docker_image.unwrap_or("-")
        ))?;
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_five_sorted() {
        let rows = collect(&PluginRegistry::bootstrap());
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, ["mariadb", "mssql", "mysql", "postgres", "sqlite"]);
    }

    #[test]
    fn sqlite_has_no_docker_image() {
        let rows = collect(&PluginRegistry::bootstrap());
        let sqlite = rows.iter().find(|r| r.name == "sqlite").unwrap();
        assert!(sqlite.docker_image.is_none());
    }

    #[test]
    fn use_and_create_flags_follow_the_dialect() {
        let rows = collect(&PluginRegistry::bootstrap());
        let flags: Vec<_> = rows
            .iter()
            .map(|r| (r.name, r.needs_use, r.creates_database))
            .collect();
        assert_eq!(
            flags,
            [
                ("mariadb", true, false),
                ("mssql", true, true),
                ("mysql", true, false),
                ("postgres", false, false),
                ("sqlite", false, false),
            ]
        );
    }

    #[test]
    fn postgres_defaults() {
        let rows = collect(&PluginRegistry::bootstrap());
        let pg = rows.iter().find(|r| r.name == "postgres").unwrap();
        assert_eq!(pg.port, "5430");
        assert_eq!(pg.driver, "postgres");
    }
}
