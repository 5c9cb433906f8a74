//! Error model shared by the node and policy stores, the tree materializer and the service layer.
//! Only `RoleNotFound` is recovered inside the crate; everything else is the caller's call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectorError {
    /// A role identifier the policy store does not know.
    #[error("role not found: {0}")]
    RoleNotFound(String),
    #[error("node not found: {0}")]
    NodeNotFound(String),
    /// Failure raised by a node or policy store while answering a query.
    #[error("store failure: {0}")]
    Store(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid fixture: {0}")]
    Fixture(String),
}

impl InspectorError {
    pub fn store(msg: impl Into<String>) -> Self { InspectorError::Store(msg.into()) }
    pub fn config(msg: impl Into<String>) -> Self { InspectorError::Config(msg.into()) }
    pub fn fixture(msg: impl Into<String>) -> Self { InspectorError::Fixture(msg.into()) }

    pub fn code_str(&self) -> &'static str {
        match self {
            InspectorError::RoleNotFound(_) => "role_not_found",
            InspectorError::NodeNotFound(_) => "node_not_found",
            InspectorError::Store(_) => "store_failure",
            InspectorError::Config(_) => "config_error",
            InspectorError::Fixture(_) => "fixture_error",
        }
    }

    /// Map to HTTP status code for hosts exposing the inspector over HTTP.
    pub fn http_status(&self) -> u16 {
        match self {
            InspectorError::RoleNotFound(_) | InspectorError::NodeNotFound(_) => 404,
            InspectorError::Store(_) => 503,
            InspectorError::Config(_) | InspectorError::Fixture(_) => 500,
        }
    }

    pub fn is_role_not_found(&self) -> bool { matches!(self, InspectorError::RoleNotFound(_)) }
}

pub type InspectorResult<T> = Result<T, InspectorError>;

impl From<anyhow::Error> for InspectorError {
    fn from(err: anyhow::Error) -> Self {
        // Default mapping: anything bubbling out of a store is a store failure
        InspectorError::Store(err.to_string())
    }
}
