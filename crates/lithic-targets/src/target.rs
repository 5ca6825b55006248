//! Complete target identity.
//!
//! Pairs an architecture with an OS identity under a stable name. Exactly
//! one pair is active per build; the struct enforces this by construction
//! and nothing downstream re-checks it.

use serde::{Deserialize, Serialize};

use crate::arch::Arch;
use crate::error::{Result, TargetError};
use crate::os::Os;

/// A target platform identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Target {
    /// Target name (e.g., "linux-x86_64", "darwin-aarch64").
    pub name: String,
    /// CPU architecture family.
    pub arch: Arch,
    /// OS identity.
    pub os: Os,
}

impl Target {
    /// Construct a target from its parts.
    pub fn new(name: impl Into<String>, arch: Arch, os: Os) -> Self {
        Self {
            name: name.into(),
            arch,
            os,
        }
    }

    /// Hosted Linux, 64-bit x86.
    pub fn linux_x86_64() -> Self {
        Self::new("linux-x86_64", Arch::X86_64, Os::Linux)
    }

    /// Hosted Linux, 32-bit x86.
    pub fn linux_i686() -> Self {
        Self::new("linux-i686", Arch::X86, Os::Linux)
    }

    /// Hosted Linux, 32-bit ARM (hard-float EABI).
    pub fn linux_armv7() -> Self {
        Self::new("linux-armv7", Arch::Arm, Os::Linux)
    }

    /// Hosted Linux, 64-bit ARM.
    pub fn linux_aarch64() -> Self {
        Self::new("linux-aarch64", Arch::Aarch64, Os::Linux)
    }

    /// Hosted Windows, 64-bit x86.
    pub fn windows_x86_64() -> Self {
        Self::new("windows-x86_64", Arch::X86_64, Os::Windows)
    }

    /// Hosted Windows, 64-bit ARM.
    pub fn windows_aarch64() -> Self {
        Self::new("windows-aarch64", Arch::Aarch64, Os::Windows)
    }

    /// Apple macOS, 64-bit x86.
    pub fn darwin_x86_64() -> Self {
        Self::new("darwin-x86_64", Arch::X86_64, Os::Darwin)
    }

    /// Apple macOS/iOS, 64-bit ARM.
    pub fn darwin_aarch64() -> Self {
        Self::new("darwin-aarch64", Arch::Aarch64, Os::Darwin)
    }

    /// NVIDIA PTX GPU offload target.
    pub fn nvptx64() -> Self {
        Self::new("nvptx64", Arch::Nvptx64, Os::None)
    }

    /// AMD GCN GPU offload target.
    pub fn amdgcn() -> Self {
        Self::new("amdgcn", Arch::Amdgcn, Os::None)
    }

    /// The built-in target catalog.
    pub fn builtins() -> Vec<Target> {
        vec![
            Self::linux_x86_64(),
            Self::linux_i686(),
            Self::linux_armv7(),
            Self::linux_aarch64(),
            Self::windows_x86_64(),
            Self::windows_aarch64(),
            Self::darwin_x86_64(),
            Self::darwin_aarch64(),
            Self::nvptx64(),
            Self::amdgcn(),
        ]
    }

    /// Look up a built-in target by name.
    pub fn builtin(name: &str) -> Result<Target> {
        Self::builtins()
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TargetError::UnknownTarget {
                name: name.to_string(),
            })
    }

    /// Interpret a target triple (e.g., "x86_64-unknown-linux-gnu").
    ///
    /// The first component must name an architecture; the OS is taken from
    /// the first later component that names one. GPU triples with no OS
    /// component (e.g., "nvptx64-nvidia-cuda") resolve to [`Os::None`].
    pub fn from_triple(triple: &str) -> Result<Target> {
        let components: Vec<&str> = triple.split('-').collect();
        let arch_component = components.first().copied().unwrap_or_default();
        let arch =
            Arch::from_component(arch_component).ok_or_else(|| TargetError::UnknownTriple {
                triple: triple.to_string(),
                detail: format!("unknown architecture '{arch_component}'"),
            })?;

        let os = components[1..]
            .iter()
            .find_map(|c| Os::from_component(c))
            .or(if arch.is_gpu() { Some(Os::None) } else { None })
            .ok_or_else(|| TargetError::UnknownTriple {
                triple: triple.to_string(),
                detail: "no recognized OS component".to_string(),
            })?;

        Ok(Target::new(triple, arch, os))
    }

    /// Resolve a name as either a built-in target or a triple.
    pub fn resolve(name: &str) -> Result<Target> {
        match Self::builtin(name) {
            Ok(t) => Ok(t),
            Err(e) => {
                // Only triple-shaped names fall through to triple parsing,
                // so plain names keep the catalog error
                let leading_arch = name
                    .split('-')
                    .next()
                    .and_then(Arch::from_component)
                    .is_some();
                if name.contains('-') && leading_arch {
                    Self::from_triple(name)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Whether this target is a GPU offload target.
    pub fn is_gpu(&self) -> bool {
        self.arch.is_gpu()
    }

    /// Whether this target is an Apple platform.
    pub fn is_apple(&self) -> bool {
        self.os.is_apple()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.arch, self.os)
    }
}
