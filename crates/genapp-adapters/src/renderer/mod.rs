//! Template renderer adapters.

mod bracket;

pub use bracket::BracketRenderer;
