//! Error types for element attributes and group operations.

use thiserror::Error;

/// Raised by an element when it rejects an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("unsupported option `{0}`")]
    UnsupportedOption(String),
    #[error("invalid value for `{key}`: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("group id `{0}` is already registered")]
    DuplicateId(String),
    #[error("no group with id `{0}`")]
    UnknownGroup(String),
    #[error("element id `{0}` is already in use")]
    DuplicateElement(String),
    #[error("no element with id `{0}`")]
    UnknownElement(String),
    #[error("element `{element}` rejected property: {source}")]
    Property {
        element: String,
        #[source]
        source: PropertyError,
    },
    #[error("{} member(s) rejected property", .0.len())]
    Properties(Vec<(String, PropertyError)>),
}

pub type Result<T, E = GroupError> = std::result::Result<T, E>;
