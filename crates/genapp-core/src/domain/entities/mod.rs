pub mod common;
pub mod generation;
pub mod render_context;
pub mod schema;
pub mod type_defn;

pub use crate::domain::DomainError;
pub use common::{Permissions, RelativePath, title_case};
pub use generation::{
    FILE_DEFNS, FileDefn, GenMode, GenerationGroup, GenerationTask, expand_placeholders, plan,
};
pub use render_context::RenderContext;
pub use schema::{Database, Field, FieldRef, Table, TableRef};
pub use type_defn::{DEFAULT_TYPES, TypeDefn, TypeTable};
