//! Export strategy selection.

use serde::{Deserialize, Serialize};

use lithic_targets::Target;

/// How an internally-implemented function is bound to its public C name.
///
/// Exactly one mode applies per (build mode, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportMode {
    /// Public packaging on a GPU target: the implementation symbol is
    /// bound to the public assembler name directly. GPU backends do not
    /// support symbol aliasing.
    GpuPublic,
    /// Public packaging on an ordinary (non-Apple) target: bound
    /// implementation symbol plus a linker-level alias under the public
    /// name.
    PublicAliased,
    /// Internal test builds, and Apple targets where the alias mechanism
    /// is unsupported: the function is defined directly under the public
    /// name.
    Private,
}

impl ExportMode {
    /// Select the export mode for a build.
    ///
    /// With public packaging disabled the alias and binding machinery is
    /// bypassed entirely, regardless of target: test harnesses want the
    /// internal name to be the only visible symbol.
    pub fn select(public_packaging: bool, target: &Target) -> ExportMode {
        if public_packaging && target.is_gpu() {
            ExportMode::GpuPublic
        } else if public_packaging && !target.is_apple() {
            ExportMode::PublicAliased
        } else {
            ExportMode::Private
        }
    }

    /// Whether this mode declares a linker-level alias symbol.
    pub fn uses_alias(self) -> bool {
        matches!(self, ExportMode::PublicAliased)
    }

    /// Whether this mode binds an implementation symbol to the public
    /// assembler name.
    pub fn uses_asm_binding(self) -> bool {
        matches!(self, ExportMode::GpuPublic | ExportMode::PublicAliased)
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportMode::GpuPublic => "gpu-public",
            ExportMode::PublicAliased => "public-aliased",
            ExportMode::Private => "private",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_gpu_selects_gpu_public() {
        assert_eq!(
            ExportMode::select(true, &Target::nvptx64()),
            ExportMode::GpuPublic
        );
        assert_eq!(
            ExportMode::select(true, &Target::amdgcn()),
            ExportMode::GpuPublic
        );
    }

    #[test]
    fn public_ordinary_selects_aliased() {
        assert_eq!(
            ExportMode::select(true, &Target::linux_x86_64()),
            ExportMode::PublicAliased
        );
        assert_eq!(
            ExportMode::select(true, &Target::windows_aarch64()),
            ExportMode::PublicAliased
        );
    }

    #[test]
    fn public_apple_falls_back_to_private() {
        assert_eq!(
            ExportMode::select(true, &Target::darwin_aarch64()),
            ExportMode::Private
        );
        assert_eq!(
            ExportMode::select(true, &Target::darwin_x86_64()),
            ExportMode::Private
        );
    }

    #[test]
    fn packaging_disabled_is_always_private() {
        for target in Target::builtins() {
            assert_eq!(
                ExportMode::select(false, &target),
                ExportMode::Private,
                "{}",
                target.name
            );
        }
    }

    #[test]
    fn mode_predicates() {
        assert!(ExportMode::GpuPublic.uses_asm_binding());
        assert!(!ExportMode::GpuPublic.uses_alias());
        assert!(ExportMode::PublicAliased.uses_alias());
        assert!(ExportMode::PublicAliased.uses_asm_binding());
        assert!(!ExportMode::Private.uses_alias());
        assert!(!ExportMode::Private.uses_asm_binding());
    }
}
