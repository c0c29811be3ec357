//! Structured errors raised by the builder, the renderers and tree validation.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type TreeResult<T> = Result<T, TreeError>;

/// Every failure a conversion can report. None of them are retried internally.
#[derive(Error, Debug)]
pub enum TreeError {
    /// No transformer matches an element. Fatal in strict mode, skipped in lenient mode.
    #[error("unknown element <{tag}>{}", discriminator_suffix(.discriminator))]
    UnknownElement {
        tag: String,
        /// The `type` of typed content or the `class` of a `div`, when present.
        discriminator: Option<String>,
    },

    #[error("{child} cannot be placed in {parent}: expected {expected}")]
    InvalidChildPlacement {
        parent: &'static str,
        child: &'static str,
        expected: String,
    },

    #[error("malformed {kind} (expected {expected}): {reason}")]
    MalformedNode {
        kind: &'static str,
        expected: String,
        reason: String,
    },

    /// The markup is not well-formed, or it has no `<body>` element.
    #[error("failed to parse markup: {0}")]
    ParseFailure(String),

    #[error("invalid tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TreeError {
    pub fn unknown_element(tag: impl Into<String>, discriminator: Option<&str>) -> Self {
        TreeError::UnknownElement {
            tag: tag.into(),
            discriminator: discriminator.map(str::to_owned),
        }
    }

    pub fn invalid_child_placement(
        parent: &'static str,
        child: &'static str,
        expected: impl Into<String>,
    ) -> Self {
        TreeError::InvalidChildPlacement {
            parent,
            child,
            expected: expected.into(),
        }
    }

    pub fn malformed(
        kind: &'static str,
        expected: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TreeError::MalformedNode {
            kind,
            expected: expected.into(),
            reason: reason.into(),
        }
    }

    pub fn parse_failure(message: impl Into<String>) -> Self {
        TreeError::ParseFailure(message.into())
    }

    /// Whether lenient building may skip past this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TreeError::UnknownElement { .. })
    }
}

impl From<roxmltree::Error> for TreeError {
    fn from(err: roxmltree::Error) -> Self {
        TreeError::ParseFailure(err.to_string())
    }
}

fn discriminator_suffix(discriminator: &Option<String>) -> String {
    match discriminator {
        Some(value) => format!(" ({value})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_element_message_names_discriminator() {
        let plain = TreeError::unknown_element("foo", None);
        assert_eq!(plain.to_string(), "unknown element <foo>");

        let typed = TreeError::unknown_element(
            "ft-content",
            Some("http://www.ft.com/ontology/content/Podcast"),
        );
        assert_eq!(
            typed.to_string(),
            "unknown element <ft-content> (http://www.ft.com/ontology/content/Podcast)"
        );
        assert!(typed.is_recoverable());
    }

    #[test]
    fn placement_errors_are_not_recoverable() {
        let err = TreeError::invalid_child_placement("list", "paragraph", "list-item");
        assert_eq!(
            err.to_string(),
            "paragraph cannot be placed in list: expected list-item"
        );
        assert!(!err.is_recoverable());
    }
}
