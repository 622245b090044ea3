//! Application services - orchestrate use cases.

pub mod generator_service;

pub use generator_service::{
    GenerationReport, GenerationSettings, GeneratorService, MODEL_SET, TaskFailure,
};
