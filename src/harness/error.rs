use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error as ThisError;

/// Boxed error any handler may fail with.
pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, ThisError)]
pub enum HarnessError {
    #[error("handler {function_name} returned a falsy response: {response}")]
    Falsy {
        function_name: String,
        response: Value,
    },
    #[error("handler {function_name} failed: {source}")]
    Handler {
        function_name: String,
        #[source]
        source: Error,
    },
    #[error("event could not be decoded for the handler: {0}")]
    Event(#[source] serde_json::Error),
    #[error("handler response could not be encoded: {0}")]
    Response(#[source] serde_json::Error),
    #[error("invalid value for {name}: {reason}")]
    Setting { name: &'static str, reason: String },
    #[error("environment variable {0} is not set")]
    MissingVariable(&'static str),
}

impl HarnessError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            HarnessError::Falsy { .. } => ErrorType::Assertion,
            HarnessError::Handler { .. } => ErrorType::Unhandled,
            HarnessError::Event(_) => ErrorType::Decode,
            HarnessError::Response(_) => ErrorType::Encode,
            HarnessError::Setting { .. } | HarnessError::MissingVariable(_) => {
                ErrorType::Configuration
            }
        }
    }

    pub fn report(&self) -> FailureReport {
        FailureReport {
            error_message: self.to_string(),
            error_type: self.error_type(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum ErrorType {
    Unhandled,
    Assertion,
    Decode,
    Encode,
    Configuration,
}

/// Failure payload in the shape of a Lambda runtime error response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    pub error_message: String,
    pub error_type: ErrorType,
}
