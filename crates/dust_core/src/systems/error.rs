use thiserror::Error;

/// Errors that can occur while assembling a system pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("system '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("system '{name}' does not access any components")]
    EmptyAccess { name: String },
}
