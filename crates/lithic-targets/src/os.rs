//! Operating system identity.

use serde::{Deserialize, Serialize};

/// OS identity of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Os {
    Linux,
    Windows,
    /// Apple platforms (macOS, iOS).
    Darwin,
    /// Freestanding or GPU offload environments with no host OS.
    None,
}

impl Os {
    /// Whether this is a Windows target.
    pub fn is_windows(self) -> bool {
        matches!(self, Os::Windows)
    }

    /// Whether this is an Apple platform.
    pub fn is_apple(self) -> bool {
        matches!(self, Os::Darwin)
    }

    /// Whether the target runs without a host OS.
    pub fn is_none(self) -> bool {
        matches!(self, Os::None)
    }

    /// Interpret an OS component of a target triple.
    ///
    /// GPU execution environments ("cuda", "amdhsa") map to [`Os::None`];
    /// the host OS is not visible from device code.
    pub fn from_component(component: &str) -> Option<Os> {
        match component {
            "linux" => Some(Os::Linux),
            "windows" => Some(Os::Windows),
            "darwin" | "macos" | "ios" => Some(Os::Darwin),
            "none" | "cuda" | "amdhsa" => Some(Os::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Os::Linux => "linux",
            Os::Windows => "windows",
            Os::Darwin => "darwin",
            Os::None => "none",
        };
        f.write_str(s)
    }
}
