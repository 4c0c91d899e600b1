//! Shared resource enums

use std::convert::Infallible;
use std::str::FromStr;

/// Cloud or infrastructure platform a machine runs on
///
/// Parsed from the machine API platform strings. Any value we do not list
/// parses to [`PlatformType::Unsupported`] rather than failing; whether that
/// is an error is up to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformType {
    /// Amazon Web Services
    Aws,
    /// Microsoft Azure
    Azure,
    /// Google Cloud Platform
    Gcp,
    /// OpenStack private cloud
    OpenStack,
    /// VMware vSphere
    VSphere,
    /// Bare metal hosts
    BareMetal,
    /// Any platform not listed above, including an empty value
    Unsupported,
}

impl PlatformType {
    /// The machine API string for this platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "GCP",
            Self::OpenStack => "OpenStack",
            Self::VSphere => "VSphere",
            Self::BareMetal => "BareMetal",
            Self::Unsupported => "Unsupported",
        }
    }
}

impl From<&str> for PlatformType {
    fn from(s: &str) -> Self {
        match s {
            "AWS" => Self::Aws,
            "Azure" => Self::Azure,
            "GCP" => Self::Gcp,
            "OpenStack" => Self::OpenStack,
            "VSphere" => Self::VSphere,
            "BareMetal" => Self::BareMetal,
            _ => Self::Unsupported,
        }
    }
}

impl FromStr for PlatformType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
