//! Floating-point platform capability classification.
//!
//! Collapses the target matrix into three booleans the numeric code
//! branches on, instead of re-deriving platform identity at every site:
//! x87 FPU presence, "long double is double" layout, and the 80-bit x87
//! extended format requirement. Classification is a pure function of the
//! target identity; contradictory targets are an upstream precondition
//! failure and are not detected here.

pub mod capabilities;

pub use capabilities::{FpCapabilities, LongDoubleFormat};
