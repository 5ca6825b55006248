//! Symbol export strategy selection and C scaffold generation.
//!
//! A libc implements every public function under an internal name inside an
//! implementation namespace; how that implementation is bound to the public
//! C symbol depends on the target class and the build mode. This crate
//! picks the strategy ([`ExportMode`]) and generates the corresponding C
//! definition scaffold:
//!
//! - GPU targets cannot alias symbols at all: the implementation symbol is
//!   bound to the public assembler name directly.
//! - Ordinary public builds bind the implementation symbol and additionally
//!   declare a linker-level alias under the public name.
//! - Internal test builds, and Apple targets (whose toolchain does not
//!   support the alias mechanism), define the function directly under the
//!   public name.

pub mod error;
pub mod export;
pub mod scaffold;
pub mod sig;

pub use error::LinkageError;
pub use export::ExportMode;
pub use scaffold::{Scaffold, ScaffoldOptions};
pub use sig::{CParam, CSignature, CType};
