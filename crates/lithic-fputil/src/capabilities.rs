//! Derived floating-point capability flags.

use serde::{Deserialize, Serialize};

use lithic_defines::DefineMap;
use lithic_targets::Target;

/// Define emitted when the target has an x87-style FPU.
pub const X87_FPU_DEFINE: &str = "X87_FPU";
/// Define emitted when `long double` has the same layout as `double`.
pub const LONG_DOUBLE_IS_DOUBLE_DEFINE: &str = "LONG_DOUBLE_IS_DOUBLE";
/// Define emitted when `long double` is the 80-bit x87 extended format.
pub const SPECIAL_X86_LONG_DOUBLE_DEFINE: &str = "SPECIAL_X86_LONG_DOUBLE";

/// Layout of `long double` on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LongDoubleFormat {
    /// Same layout as `double`.
    Double,
    /// 80-bit x87 extended format.
    X87Extended,
    /// The platform's native extended-precision format (e.g., IEEE
    /// binary128 on AArch64 Linux).
    Native,
}

/// Floating-point capability flags derived from a target identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FpCapabilities {
    /// The target has an x87-style extended-precision FPU.
    pub has_x87_fpu: bool,
    /// `long double` has the same layout as `double`.
    pub long_double_is_double: bool,
    /// `long double` is the 80-bit x87 extended format.
    pub special_x86_long_double: bool,
}

impl FpCapabilities {
    /// Classify a target.
    ///
    /// The three rules are evaluated in order; the third depends on the
    /// first two. `long_double_is_double` and `special_x86_long_double`
    /// can never both be set.
    pub fn classify(target: &Target) -> FpCapabilities {
        let has_x87_fpu = target.arch.is_x86();

        let long_double_is_double = target.os.is_windows()
            || target.arch.is_arm32()
            || (target.os.is_apple() && target.arch.is_aarch64());

        let special_x86_long_double = !long_double_is_double && has_x87_fpu;

        FpCapabilities {
            has_x87_fpu,
            long_double_is_double,
            special_x86_long_double,
        }
    }

    /// The `long double` layout implied by the flags.
    pub fn long_double_format(&self) -> LongDoubleFormat {
        if self.long_double_is_double {
            LongDoubleFormat::Double
        } else if self.special_x86_long_double {
            LongDoubleFormat::X87Extended
        } else {
            LongDoubleFormat::Native
        }
    }

    /// Project the set flags into a define table.
    ///
    /// Set flags become valueless defines under the names the numeric code
    /// tests; unset flags produce no entry.
    pub fn apply_defines(&self, map: &mut DefineMap) -> lithic_defines::error::Result<()> {
        if self.has_x87_fpu {
            map.define(X87_FPU_DEFINE)?;
        }
        if self.long_double_is_double {
            map.define(LONG_DOUBLE_IS_DOUBLE_DEFINE)?;
        }
        if self.special_x86_long_double {
            map.define(SPECIAL_X86_LONG_DOUBLE_DEFINE)?;
        }
        Ok(())
    }
}
