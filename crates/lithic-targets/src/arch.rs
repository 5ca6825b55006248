//! CPU architecture identity.
//!
//! The architecture axis of a target. Classification downstream only ever
//! asks the predicate questions (x86 family, 32-bit ARM, AArch64, GPU), so
//! the enum stays coarse: one variant per ABI-distinct family, not one per
//! microarchitecture.

use serde::{Deserialize, Serialize};

/// CPU architecture family of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arch {
    /// 32-bit x86 (i386 through i686).
    X86,
    /// 64-bit x86.
    X86_64,
    /// 32-bit ARM (ARMv7 and earlier).
    Arm,
    /// 64-bit ARM.
    Aarch64,
    /// NVIDIA PTX GPU backend.
    Nvptx64,
    /// AMD GCN GPU backend.
    Amdgcn,
}

impl Arch {
    /// Whether this is an x86-family CPU (32- or 64-bit).
    pub fn is_x86(self) -> bool {
        matches!(self, Arch::X86 | Arch::X86_64)
    }

    /// Whether this is 32-bit ARM.
    pub fn is_arm32(self) -> bool {
        matches!(self, Arch::Arm)
    }

    /// Whether this is 64-bit ARM.
    pub fn is_aarch64(self) -> bool {
        matches!(self, Arch::Aarch64)
    }

    /// Whether this is a GPU offload backend.
    pub fn is_gpu(self) -> bool {
        matches!(self, Arch::Nvptx64 | Arch::Amdgcn)
    }

    /// Native word size in bits.
    pub fn word_size(self) -> u32 {
        match self {
            Arch::X86 | Arch::Arm => 32,
            Arch::X86_64 | Arch::Aarch64 | Arch::Nvptx64 | Arch::Amdgcn => 64,
        }
    }

    /// Interpret the architecture component of a target triple.
    pub fn from_component(component: &str) -> Option<Arch> {
        match component {
            "i386" | "i486" | "i586" | "i686" | "x86" => Some(Arch::X86),
            "x86_64" | "amd64" => Some(Arch::X86_64),
            "aarch64" | "arm64" => Some(Arch::Aarch64),
            "nvptx64" => Some(Arch::Nvptx64),
            "amdgcn" => Some(Arch::Amdgcn),
            c if c.starts_with("armv") || c.starts_with("thumbv") || c == "arm" => {
                Some(Arch::Arm)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Arm => "arm",
            Arch::Aarch64 => "aarch64",
            Arch::Nvptx64 => "nvptx64",
            Arch::Amdgcn => "amdgcn",
        };
        f.write_str(s)
    }
}
