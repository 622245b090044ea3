//! Code fragments generated from a resolved schema.
//!
//! These are pure string builders: SQL DDL/DML, host-language struct
//! declarations and HTML form inputs. They need upward context (a field's
//! dialect lives on the database), so they hang off lightweight views that
//! pair an element with its owning [`Database`].
//!
//! Type lookups cannot fail once [`Database::resolve_plugin`] succeeded; if
//! they do anyway, a [`DomainError`] is returned rather than panicking.

use crate::domain::{
    DomainError,
    entities::{Database, Field, FieldRef, Table, TableRef, TypeDefn},
};

// ── FieldView ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    db: &'a Database,
    table: &'a Table,
    field: &'a Field,
    at: FieldRef,
}

impl<'a> FieldView<'a> {
    pub fn field(&self) -> &'a Field {
        self.field
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn at(&self) -> FieldRef {
        self.at
    }

    /// The field's concrete type under the database's dialect.
    pub fn type_defn(&self) -> Result<&'static TypeDefn, DomainError> {
        self.db
            .plugin()?
            .find_type(&self.field.type_name)
            .ok_or_else(|| DomainError::UnknownFieldType {
                table: self.table.name.clone(),
                field: self.field.name.clone(),
                type_name: self.field.type_name.clone(),
            })
    }

    pub fn host_type(&self) -> Result<&'static str, DomainError> {
        Ok(self.type_defn()?.host)
    }

    /// `\t<Name>\t<TYPE>[(len[,dec])][ NOT NULL][ PRIMARY KEY]<comma>[ <extra>]\n`
    pub fn sql_column_clause(&self, trailing_comma: &str) -> Result<String, DomainError> {
        let td = self.type_defn()?;
        let f = self.field;

        let sql_type = match (f.len, f.dec) {
            (0, _) => td.sql.to_string(),
            (len, 0) => format!("{}({})", td.sql, len),
            (len, dec) => format!("{}({},{})", td.sql, len, dec),
        };
        let not_null = if f.nullable { "" } else { " NOT NULL" };
        let pk = if f.primary_key { " PRIMARY KEY" } else { "" };
        let extra = if f.sql_parms.is_empty() {
            String::new()
        } else {
            format!(" {}", f.sql_parms)
        };

        Ok(format!(
            "\t{}\t{}{}{}{}{}\n",
            f.name, sql_type, not_null, pk, trailing_comma, extra
        ))
    }

    /// `\t<Title>\t<hostType>\n`
    pub fn host_declaration(&self) -> Result<String, DomainError> {
        Ok(format!(
            "\t{}\t{}\n",
            self.field.titled_name(),
            self.host_type()?
        ))
    }

    /// One form control bound to `{{.Rcd.<Title>}}`.
    pub fn form_input(&self) -> Result<String, DomainError> {
        let td = self.type_defn()?;
        let name = self.field.titled_name();

        if self.field.hidden {
            return Ok(format!(
                "\t<input type=\"hidden\" name=\"{n}\" id=\"{n}\" value=\"{{{{.Rcd.{n}}}}}\">\n",
                n = name
            ));
        }

        let extra = if td.is_money() {
            "min=\"0\" step=\"0.01\" "
        } else {
            ""
        };
        Ok(format!(
            "\t<label>{label}: <input type=\"{html}\" name=\"{n}\" id=\"{n}\" {extra}value=\"{{{{.Rcd.{n}}}}}\"></label>\n",
            label = self.field.display_label(),
            html = td.html,
            n = name,
            extra = extra,
        ))
    }
}

// ── TableView ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    db: &'a Database,
    table: &'a Table,
    at: TableRef,
}

impl<'a> TableView<'a> {
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn database(&self) -> &'a Database {
        self.db
    }

    pub fn at(&self) -> TableRef {
        self.at
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldView<'a>> + 'a {
        let (db, table, ti) = (self.db, self.table, self.at.0);
        table
            .fields
            .iter()
            .enumerate()
            .map(move |(fi, field)| FieldView {
                db,
                table,
                field,
                at: FieldRef {
                    table: ti,
                    field: fi,
                },
            })
    }

    pub fn field(&self, name: &str) -> Option<FieldView<'a>> {
        self.fields().find(|f| f.field.name == name)
    }

    /// Table name with the database's schema prefix, e.g. `dbo.Movie`.
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.db.schema, self.table.name)
    }

    fn any_type(&self, pred: fn(&TypeDefn) -> bool) -> Result<bool, DomainError> {
        for f in self.fields() {
            if pred(f.type_defn()?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn has_date(&self) -> Result<bool, DomainError> {
        self.any_type(TypeDefn::is_date)
    }

    pub fn has_dec(&self) -> Result<bool, DomainError> {
        self.any_type(TypeDefn::is_dec)
    }

    pub fn has_float(&self) -> Result<bool, DomainError> {
        self.any_type(TypeDefn::is_float)
    }

    pub fn has_integer(&self) -> Result<bool, DomainError> {
        self.any_type(TypeDefn::is_integer)
    }

    pub fn has_text(&self) -> Result<bool, DomainError> {
        self.any_type(TypeDefn::is_text)
    }

    /// Full `CREATE TABLE` statement, including the dialect's batch
    /// terminator.
    pub fn create_table_statement(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let mut sql = format!("CREATE TABLE {} (\n", self.qualified_name());

        let count = self.table.fields.len();
        let has_parms = !self.table.sql_parms.is_empty();
        for (i, field) in self.fields().enumerate() {
            let comma = if i + 1 < count || has_parms { "," } else { "" };
            sql.push_str(&field.sql_column_clause(comma)?);
        }
        if has_parms {
            let parms: Vec<String> = self
                .table
                .sql_parms
                .iter()
                .map(|p| format!("\t{}", p))
                .collect();
            sql.push_str(&parms.join(",\n"));
            sql.push('\n');
        }
        sql.push_str(");\n");

        Ok(plugin.terminate(sql))
    }

    pub fn drop_table_statement(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        Ok(plugin.terminate(format!("DROP TABLE IF EXISTS {};\n", self.qualified_name())))
    }

    /// `type <Title> struct { ... }` with one declaration per field.
    pub fn host_struct(&self) -> Result<String, DomainError> {
        let mut out = format!("type {} struct {{\n", self.table.titled_name());
        for f in self.fields() {
            out.push_str(&f.host_declaration()?);
        }
        out.push_str("}\n");
        Ok(out)
    }

    pub fn form_inputs(&self) -> Result<String, DomainError> {
        self.fields().map(|f| f.form_input()).collect()
    }

    // ── placeholders ────────────────────────────────────────────────────

    /// `k1 <rel> ?1 AND k2 <rel> ?2`, numbered from `first`.
    fn key_condition(&self, rel: &str, first: usize) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        Ok(self
            .table
            .keys()?
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{} {} {}", k, rel, plugin.placeholder(first + i)))
            .collect::<Vec<_>>()
            .join(" AND "))
    }

    /// `key1 = ? AND key2 = ?` (or `$1`, `$2` ...).
    pub fn key_search(&self, rel: &str) -> Result<String, DomainError> {
        self.key_condition(rel, 1)
    }

    /// One placeholder per primary key: `?, ?`.
    pub fn keys_placeholder(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let count = self.table.keys()?.len();
        Ok((1..=count)
            .map(|i| plugin.placeholder(i))
            .collect::<Vec<_>>()
            .join(", "))
    }

    /// One placeholder per inserted (non auto-increment) field.
    pub fn data_placeholder(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let count = self.table.fields.iter().filter(|f| !f.incr).count();
        Ok((1..=count)
            .map(|i| plugin.placeholder(i))
            .collect::<Vec<_>>()
            .join(", "))
    }

    // ── row statements ──────────────────────────────────────────────────

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {};", self.qualified_name())
    }

    pub fn insert_sql(&self) -> Result<String, DomainError> {
        let columns: Vec<&str> = self
            .table
            .fields
            .iter()
            .filter(|f| !f.incr)
            .map(|f| f.name.as_str())
            .collect();
        Ok(format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.qualified_name(),
            columns.join(", "),
            self.data_placeholder()?
        ))
    }

    /// Updates every non-key, non auto-increment field; keys go last.
    pub fn update_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let sets: Vec<String> = self
            .table
            .fields
            .iter()
            .filter(|f| !f.primary_key && !f.incr)
            .enumerate()
            .map(|(i, f)| format!("{} = {}", f.name, plugin.placeholder(i + 1)))
            .collect();
        Ok(format!(
            "UPDATE {} SET {} WHERE {};",
            self.qualified_name(),
            sets.join(", "),
            self.key_condition("=", sets.len() + 1)?
        ))
    }

    pub fn row_delete_sql(&self) -> Result<String, DomainError> {
        Ok(format!(
            "DELETE FROM {} WHERE {};",
            self.qualified_name(),
            self.key_search("=")?
        ))
    }

    pub fn find_sql(&self) -> Result<String, DomainError> {
        Ok(format!(
            "SELECT * FROM {} WHERE {};",
            self.qualified_name(),
            self.key_search("=")?
        ))
    }

    fn ordered(&self, direction: &str) -> Result<String, DomainError> {
        Ok(self.table.keys_list("", &format!(" {}", direction)))
    }

    pub fn first_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        Ok(plugin.select_one_sql(&self.qualified_name(), None, &self.ordered("ASC")?))
    }

    pub fn last_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        Ok(plugin.select_one_sql(&self.qualified_name(), None, &self.ordered("DESC")?))
    }

    pub fn next_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let filter = self.key_search(">")?;
        Ok(plugin.select_one_sql(&self.qualified_name(), Some(&filter), &self.ordered("ASC")?))
    }

    pub fn prev_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        let filter = self.key_search("<")?;
        Ok(plugin.select_one_sql(&self.qualified_name(), Some(&filter), &self.ordered("DESC")?))
    }

    pub fn page_sql(&self) -> Result<String, DomainError> {
        let plugin = self.db.plugin()?;
        Ok(format!(
            "SELECT * FROM {} ORDER BY {} {};",
            self.qualified_name(),
            self.table.keys()?.join(", "),
            plugin.page_clause()
        ))
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

impl Database {
    pub fn table_view(&self, at: TableRef) -> Option<TableView<'_>> {
        self.tables.get(at.0).map(|table| TableView {
            db: self,
            table,
            at,
        })
    }

    pub fn table_views(&self) -> impl Iterator<Item = TableView<'_>> {
        self.tables
            .iter()
            .enumerate()
            .map(move |(i, table)| TableView {
                db: self,
                table,
                at: TableRef(i),
            })
    }

    pub fn field_view(&self, at: FieldRef) -> Option<FieldView<'_>> {
        let table = self.tables.get(at.table)?;
        let field = table.fields.get(at.field)?;
        Some(FieldView {
            db: self,
            table,
            field,
            at,
        })
    }

    pub fn create_database_sql(&self) -> Result<String, DomainError> {
        Ok(self.plugin()?.create_database_sql(&self.titled_name()))
    }

    pub fn drop_database_sql(&self) -> Result<String, DomainError> {
        Ok(self.plugin()?.drop_database_sql(&self.titled_name()))
    }

    pub fn use_database_sql(&self) -> Result<String, DomainError> {
        Ok(self.plugin()?.use_database_sql(&self.titled_name()))
    }

    pub fn connection_string(&self) -> Result<String, DomainError> {
        let params = self.connection_params()?;
        Ok(self.plugin()?.connection_string(&params))
    }

    pub fn flag_defns(&self) -> Result<String, DomainError> {
        Ok(self.plugin()?.flag_defns(&self.titled_name()))
    }
}
