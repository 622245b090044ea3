use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{DomainError, entities::Database, fragments::TableView};

/// Named string values a model template may reference.
///
/// Built once per database; per-table tasks extend a clone with the table
/// keys. Keys are kept sorted so rendered diagnostics are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    vars: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Database-level variables, then the user's defines on top.
    pub fn for_database(
        db: &Database,
        defines: &BTreeMap<String, String>,
    ) -> Result<Self, DomainError> {
        let plugin = db.plugin()?;
        let params = db.connection_params()?;
        let mut ctx = Self::new();

        ctx.insert("DbName", db.titled_name());
        ctx.insert("DbNameLower", db.name.to_lowercase());
        ctx.insert("DbType", plugin.name());
        ctx.insert("DbDriver", plugin.driver_name());
        ctx.insert("DbImport", plugin.import_string());
        ctx.insert("DbServer", params.server.clone());
        ctx.insert("DbPort", params.port.clone());
        ctx.insert("DbUser", params.user.clone());
        ctx.insert("DbPW", params.password.clone());
        ctx.insert("DbConnection", plugin.connection_string(&params));
        ctx.insert("DbFlagDefns", db.flag_defns()?);
        ctx.insert("DbCreateSql", db.create_database_sql()?);
        ctx.insert("DbDeleteSql", db.drop_database_sql()?);
        ctx.insert("DbUseSql", db.use_database_sql()?);
        ctx.insert("DbNeedsUse", plugin.needs_use().to_string());
        ctx.insert("DbCreatesDb", plugin.creates_database().to_string());
        ctx.insert("DbSchema", db.schema.clone());
        ctx.insert(
            "TableNames",
            db.tables
                .iter()
                .map(|t| t.titled_name())
                .collect::<Vec<_>>()
                .join(", "),
        );
        ctx.insert(
            "GenTime",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );

        for (key, value) in defines {
            ctx.insert(key.clone(), value.clone());
        }
        Ok(ctx)
    }

    /// A copy of `self` with the table-level variables added.
    pub fn with_table(&self, view: &TableView<'_>) -> Result<Self, DomainError> {
        let table = view.table();
        let mut ctx = self.clone();

        ctx.insert("TblName", table.titled_name());
        ctx.insert("TblNameLower", table.name.to_lowercase());
        ctx.insert("TblCreateSql", view.create_table_statement()?);
        ctx.insert("TblDeleteSql", view.drop_table_statement()?);
        ctx.insert("TblStruct", view.host_struct()?);
        ctx.insert("TblFormInputs", view.form_inputs()?);
        ctx.insert("TblFieldList", table.field_name_list(""));
        ctx.insert("TblKeys", table.keys()?.join(", "));
        ctx.insert("TblKeysList", table.keys_list("", ""));
        ctx.insert("TblKeySearch", view.key_search("=")?);
        ctx.insert("TblKeysPlaceholder", view.keys_placeholder()?);
        ctx.insert("TblDataPlaceholder", view.data_placeholder()?);
        ctx.insert("TblInsertSql", view.insert_sql()?);
        ctx.insert("TblUpdateSql", view.update_sql()?);
        ctx.insert("TblCountSql", view.count_sql());
        ctx.insert("TblFindSql", view.find_sql()?);
        ctx.insert("TblFirstSql", view.first_sql()?);
        ctx.insert("TblLastSql", view.last_sql()?);
        ctx.insert("TblNextSql", view.next_sql()?);
        ctx.insert("TblPrevSql", view.prev_sql()?);
        ctx.insert("TblPageSql", view.page_sql()?);
        ctx.insert("TblRowDeleteSql", view.row_delete_sql()?);
        Ok(ctx)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
