//! Code generation error types

use ec_common::{CompilerError, DataType, SourceLocation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to write generated code: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot vardump '{name}' of type {data_type} at {location}")]
    UnsupportedVardump {
        name: String,
        data_type: DataType,
        location: SourceLocation,
    },

    #[error("enumerator value is not a constant expression at {location}")]
    NonConstantEnumerator { location: SourceLocation },

    #[error("unknown symbol '{name}' at {location}")]
    UnknownSymbol {
        name: String,
        location: SourceLocation,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CodegenError {
    pub(crate) fn internal(message: impl Into<String>) -> Self {
        CodegenError::InternalError {
            message: message.into(),
        }
    }
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        match err {
            CodegenError::Io(io) => CompilerError::from(io),
            CodegenError::InternalError { message } => CompilerError::internal(message),
            other => CompilerError::codegen_error(other.to_string()),
        }
    }
}
