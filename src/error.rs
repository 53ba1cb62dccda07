use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoltonError {
    #[error("No implementation of the trait {capability} found for {}", .target.as_deref().unwrap_or("receiver"))]
    NoImplementationFound {
        capability: &'static str,
        target: Option<String>,
    },
    #[error("Implementation {implementation} of the trait {capability} does not implement {method}")]
    MethodNotImplemented {
        capability: &'static str,
        implementation: String,
        method: String,
    },
    #[error("Method {method} is not declared by the trait {capability}")]
    UndeclaredMethod {
        capability: &'static str,
        method: String,
    },
    #[error("No method {method} on {type_name}")]
    NoSuchMethod { type_name: String, method: String },
    #[error("Type mismatch in {context}: expected {expected}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
    },
    #[error("Missing argument at position {index}")]
    MissingArgument { index: usize },
    #[error("Implementation error: {0}")]
    Implementation(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, BoltonError>;

// Helper conversions
impl From<config::ConfigError> for BoltonError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
