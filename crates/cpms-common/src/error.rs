//! Error types for the control plane machine set core
//!
//! Errors are structured with fields so the offending value travels with the
//! failure. Call sites add context with [`Error::with_context`] rather than
//! re-stringifying the cause, so callers can still match on the root cause.

use thiserror::Error;

use crate::crd::PlatformType;

/// Main error type for provider config and failure domain operations
#[derive(Debug, Error)]
pub enum Error {
    /// The explicit platform hint names a provider with no config support
    #[error("unsupported platform type: {platform}")]
    UnsupportedPlatformType {
        /// The raw platform value as it appeared on the resource
        platform: String,
    },

    /// The embedded provider spec `kind` is not one we know how to decode
    #[error("unknown provider config type: {kind}")]
    UnknownProviderConfigType {
        /// The raw `kind` discriminator found in the provider spec
        kind: String,
    },

    /// An operation was given two values of different provider variants
    #[error("mismatched platform types: expected {expected}, got {actual}")]
    MismatchedPlatformTypes {
        /// Platform of the receiver
        expected: PlatformType,
        /// Platform of the argument
        actual: PlatformType,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The provider spec kind being processed (if known)
        kind: Option<String>,
    },

    /// An error with call-site context wrapped around its cause
    #[error("{context}: {source}")]
    Wrapped {
        /// What the caller was doing when the cause occurred
        context: String,
        /// The underlying error
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create an unsupported platform error for the raw platform value
    pub fn unsupported_platform(platform: impl Into<String>) -> Self {
        Self::UnsupportedPlatformType {
            platform: platform.into(),
        }
    }

    /// Create an unknown provider config type error for the raw kind
    pub fn unknown_provider_config_type(kind: impl Into<String>) -> Self {
        Self::UnknownProviderConfigType { kind: kind.into() }
    }

    /// Create a mismatched platform types error
    pub fn mismatched_platform_types(expected: PlatformType, actual: PlatformType) -> Self {
        Self::MismatchedPlatformTypes { expected, actual }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error with provider spec kind context
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Wrap this error with call-site context
    ///
    /// The rendered message becomes `<context>: <self>`.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Walk through any [`Error::Wrapped`] layers to the innermost error
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Wrapped { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Get the provider spec kind if this error is associated with one
    pub fn kind(&self) -> Option<&str> {
        match self.root_cause() {
            Error::UnknownProviderConfigType { kind } => Some(kind),
            Error::Serialization { kind, .. } => kind.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Story: the template path rejects a platform it cannot configure
    ///
    /// The raw value is carried so the admission response can echo it.
    #[test]
    fn story_unsupported_platform_names_the_value() {
        let err = Error::unsupported_platform("invalid");
        assert_eq!(err.to_string(), "unsupported platform type: invalid");

        match &err {
            Error::UnsupportedPlatformType { platform } => assert_eq!(platform, "invalid"),
            _ => panic!("Expected UnsupportedPlatformType variant"),
        }
    }

    /// Story: platform detection on a bare machine wraps the unknown kind
    ///
    /// The operator sees the context, while code can still match the cause.
    #[test]
    fn story_platform_detection_wraps_unknown_kind() {
        let err = Error::unknown_provider_config_type("InvalidProviderSpecKind")
            .with_context("could not determine platform type");

        assert_eq!(
            err.to_string(),
            "could not determine platform type: unknown provider config type: InvalidProviderSpecKind"
        );
        assert!(matches!(
            err.root_cause(),
            Error::UnknownProviderConfigType { kind } if kind == "InvalidProviderSpecKind"
        ));
        assert_eq!(err.kind(), Some("InvalidProviderSpecKind"));
    }

    #[test]
    fn test_nested_context_renders_outermost_first() {
        let err = Error::serialization_for_kind("AWSMachineProviderConfig", "missing field")
            .with_context("failed to parse AWS provider config")
            .with_context("machine master-0");

        assert_eq!(
            err.to_string(),
            "machine master-0: failed to parse AWS provider config: serialization error: missing field"
        );
        assert_eq!(err.kind(), Some("AWSMachineProviderConfig"));
    }

    #[test]
    fn test_root_cause_of_unwrapped_error_is_itself() {
        let err = Error::serialization("bad bytes");
        assert!(matches!(err.root_cause(), Error::Serialization { kind: None, .. }));
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_mismatched_platform_types_message() {
        let err = Error::mismatched_platform_types(PlatformType::Aws, PlatformType::Azure);
        assert_eq!(
            err.to_string(),
            "mismatched platform types: expected AWS, got Azure"
        );
    }

    #[test]
    fn test_wrapped_error_exposes_source() {
        use std::error::Error as _;

        let err = Error::unsupported_platform("OpenStack").with_context("template");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("unsupported platform type: OpenStack")
        );
    }
}
