use thiserror::Error;

// Error message prefixes
const MSG_INVALID_PREFIX: &str = "Invalid";
const MSG_UNSUPPORTED_PREFIX: &str = "Unsupported";

/// Result type for the `schema_diff` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Errors raised while configuring registries or parsing schemas and paths
#[derive(Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A descriptor for this type name was registered twice
    #[error("Type \"{type_name}\" is already registered")]
    DuplicateType {
        /// The type tag that collided
        type_name: String,
    },

    /// A dotted path string contained a malformed segment
    #[error("Invalid path segment: {0}")]
    InvalidPathSegment(String),

    /// A JSON Pointer did not address a schema field
    #[error("{0}")]
    InvalidPointer(String),

    /// No registered descriptor could parse a schema
    #[error("{0}")]
    UnsupportedSchema(String),

    /// No registered descriptor could serialize a node
    #[error("{0}")]
    UnsupportedNode(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateType { type_name } => f
                .debug_struct("DuplicateType")
                .field("type_name", type_name)
                .finish(),
            Self::InvalidPathSegment(s) => f.debug_tuple("InvalidPathSegment").field(s).finish(),
            Self::InvalidPointer(s) => f.debug_tuple("InvalidPointer").field(s).finish(),
            Self::UnsupportedSchema(s) => f.debug_tuple("UnsupportedSchema").field(s).finish(),
            Self::UnsupportedNode(s) => f.debug_tuple("UnsupportedNode").field(s).finish(),
        }
    }
}

impl Error {
    // Builder methods for common patterns

    /// Create a duplicate registration error
    pub fn duplicate_type(type_name: impl Into<String>) -> Self {
        Self::DuplicateType {
            type_name: type_name.into(),
        }
    }

    /// Create an "Invalid pointer" error
    pub fn invalid_pointer(pointer: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidPointer(format!("{MSG_INVALID_PREFIX} pointer '{pointer}': {details}"))
    }

    /// Create an "Unsupported schema" error
    pub fn unsupported_schema(name: &str, details: impl std::fmt::Display) -> Self {
        Self::UnsupportedSchema(format!(
            "{MSG_UNSUPPORTED_PREFIX} schema for field '{name}': {details}"
        ))
    }

    /// Create an "Unsupported node" error
    pub fn unsupported_node(name: &str, details: impl std::fmt::Display) -> Self {
        Self::UnsupportedNode(format!(
            "{MSG_UNSUPPORTED_PREFIX} node '{name}': {details}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_type_message_quotes_the_name() {
        let error = Error::duplicate_type("string");
        assert_eq!(error.to_string(), "Type \"string\" is already registered");
    }

    #[test]
    fn invalid_segment_message_names_the_segment() {
        let error = Error::InvalidPathSegment("1abc".to_string());
        assert_eq!(error.to_string(), "Invalid path segment: 1abc");
    }
}
