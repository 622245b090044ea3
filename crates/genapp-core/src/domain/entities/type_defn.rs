//! Abstract field types and their per-dialect concrete forms.

use serde::Serialize;

/// Mapping from an abstract schema type name (`money`, `date`, ...) to the
/// SQL column type, HTML input type and host-language type used when
/// generating code for one dialect.
///
/// Tables of these are compiled into each dialect plugin and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeDefn {
    pub name: &'static str,
    pub html: &'static str,
    pub sql: &'static str,
    pub host: &'static str,
    /// Suggested column length when the schema gives none (0 = unbounded).
    pub default_len: u32,
}

impl TypeDefn {
    pub const fn new(
        name: &'static str,
        html: &'static str,
        sql: &'static str,
        host: &'static str,
        default_len: u32,
    ) -> Self {
        Self {
            name,
            html,
            sql,
            host,
            default_len,
        }
    }

    /// Fixed-point types (rendered with a decimal count).
    pub fn is_dec(&self) -> bool {
        matches!(self.name, "dec" | "decimal" | "money")
    }

    pub fn is_float(&self) -> bool {
        self.host == "float64"
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.host, "int" | "int32" | "int64")
    }

    pub fn is_text(&self) -> bool {
        self.name == "text"
    }

    pub fn is_date(&self) -> bool {
        self.host == "time.Time" || matches!(self.name, "date" | "datetime" | "time")
    }

    pub fn is_money(&self) -> bool {
        self.name == "money"
    }
}

/// Lookup helper over a dialect's static type table.
#[derive(Debug, Clone, Copy)]
pub struct TypeTable(&'static [TypeDefn]);

impl TypeTable {
    pub const fn new(defns: &'static [TypeDefn]) -> Self {
        Self(defns)
    }

    /// Exact, case-sensitive lookup by abstract type name.
    pub fn find(&self, name: &str) -> Option<&'static TypeDefn> {
        self.0.iter().find(|td| td.name == name)
    }

    /// Default length for `name`, if the type is known.
    pub fn default_len(&self, name: &str) -> Option<u32> {
        self.find(name).map(|td| td.default_len)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|td| td.name)
    }

    pub fn as_slice(&self) -> &'static [TypeDefn] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Type table shared by dialects that need no overrides.
pub const DEFAULT_TYPES: &[TypeDefn] = &[
    TypeDefn::new("date", "date", "DATE", "string", 0),
    TypeDefn::new("datetime", "datetime", "DATETIME", "string", 0),
    TypeDefn::new("email", "email", "VARCHAR", "string", 50),
    TypeDefn::new("dec", "number", "DEC", "string", 0),
    TypeDefn::new("decimal", "number", "DEC", "string", 0),
    TypeDefn::new("int", "number", "INT", "int64", 0),
    TypeDefn::new("integer", "number", "INT", "int64", 0),
    TypeDefn::new("money", "number", "DEC", "string", 0),
    TypeDefn::new("number", "number", "INT", "int64", 0),
    // +nnn (nnn) nnn-nnnn
    TypeDefn::new("tel", "tel", "VARCHAR", "string", 19),
    TypeDefn::new("text", "text", "VARCHAR", "string", 0),
    TypeDefn::new("time", "time", "TIME", "string", 0),
    TypeDefn::new("url", "url", "VARCHAR", "string", 50),
];
