//! `[[.Key]]` substitution renderer.
//!
//! Model files are themselves Go templates full of `{{ }}` actions, so the
//! generator uses square-bracket delimiters and leaves curly braces alone.

use genapp_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::GenappResult,
};
use tracing::{instrument, trace};

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

/// Replaces every `[[.Key]]` (whitespace inside the brackets allowed) with
/// the context value for `Key`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketRenderer;

impl BracketRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for BracketRenderer {
    #[instrument(skip_all, fields(len = template.len()))]
    fn render(&self, template: &str, context: &RenderContext) -> GenappResult<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                return Err(failed(format!(
                    "unclosed '{}' at byte {}",
                    OPEN,
                    template.len() - rest.len() + start
                )));
            };

            let action = after[..end].trim();
            let key = action
                .strip_prefix('.')
                .filter(|k| !k.is_empty() && k.chars().all(|c| c.is_alphanumeric() || c == '_'))
                .ok_or_else(|| failed(format!("unsupported action '{}'", action)))?;

            let value = context
                .get(key)
                .ok_or_else(|| failed(format!("unknown key '{}'", key)))?;
            trace!(key, "substituted");
            out.push_str(value);

            rest = &after[end + CLOSE.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn failed(reason: String) -> genapp_core::error::GenappError {
    ApplicationError::RenderingFailed {
        model: String::new(),
        reason,
    }
    .into()
}
