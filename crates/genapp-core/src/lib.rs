//! genapp Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers of the genapp SQL CRUD application
//! generator. A JSON database schema plus a SQL dialect plugin become the
//! source files of a small web application.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            genapp-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GeneratorService)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, TemplateRenderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     genapp-adapters (Infrastructure)    │
//! │ (LocalFilesystem, BracketRenderer, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Database, Plugin, DomainValidator)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use genapp_core::prelude::*;
//!
//! let service = GeneratorService::new(filesystem, renderer, PluginRegistry::bootstrap());
//! let report = service.generate("movies.json".as_ref(), &GenerationSettings::default())?;
//! assert!(report.is_success());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationSettings, GeneratorService,
        ports::{Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        Database, DomainValidator, Field, GenMode, GenerationTask, Permissions, Plugin,
        PluginRegistry, RenderContext, Table,
    };
    pub use crate::error::{GenappError, GenappResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
