//! Kubernetes-style field errors
//!
//! Rendering follows the API server so admission responses read the same as
//! any other rejected request: `<path>: <type>: <detail>`. A list of errors
//! renders as a single error when it holds one, otherwise as `[e1, e2]`.

use thiserror::Error;

/// A single validation failure at a field path
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A required field or value is missing
    #[error("{path}: Required value{}", suffix(.detail))]
    Required {
        /// Dotted field path
        path: String,
        /// What is required, may be empty
        detail: String,
    },

    /// A field holds a value that is not acceptable
    #[error("{path}: Invalid value: {value}: {detail}")]
    Invalid {
        /// Dotted field path
        path: String,
        /// The rendered offending value
        value: String,
        /// Why the value is rejected
        detail: String,
    },

    /// A field may not be set or changed
    #[error("{path}: Forbidden{}", suffix(.detail))]
    Forbidden {
        /// Dotted field path
        path: String,
        /// Why the change is forbidden
        detail: String,
    },

    /// A field holds a value outside a fixed set
    #[error("{path}: Unsupported value: {value}: supported values: {}", quoted(.supported))]
    NotSupported {
        /// Dotted field path
        path: String,
        /// The rendered offending value
        value: String,
        /// The accepted values
        supported: Vec<String>,
    },
}

fn suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {detail}")
    }
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FieldError {
    /// Create a required value error
    pub fn required(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Required {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an invalid value error; `value` is rendered with `Debug`
    pub fn invalid(
        path: impl Into<String>,
        value: &impl std::fmt::Debug,
        detail: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            path: path.into(),
            value: format!("{value:?}"),
            detail: detail.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Forbidden {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an unsupported value error
    pub fn not_supported(
        path: impl Into<String>,
        value: impl std::fmt::Display,
        supported: &[&str],
    ) -> Self {
        Self::NotSupported {
            path: path.into(),
            value: value.to_string(),
            supported: supported.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Field path the error is reported at
    pub fn path(&self) -> &str {
        match self {
            Self::Required { path, .. }
            | Self::Invalid { path, .. }
            | Self::Forbidden { path, .. }
            | Self::NotSupported { path, .. } => path,
        }
    }
}

/// Every validation failure of one admission request
#[derive(Clone, Debug, Default, Error, PartialEq, Eq)]
#[error("{}", aggregate(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn aggregate(errors: &[FieldError]) -> String {
    match errors {
        [] => String::new(),
        [single] => single.to_string(),
        many => format!(
            "[{}]",
            many.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

impl ValidationErrors {
    /// An empty error list
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Record several errors
    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.0.extend(errors);
    }

    /// Returns true if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The recorded errors, in the order they were found
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}
