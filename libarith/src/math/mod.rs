//! Exact number types and the integer algorithms backing them.
//!
//! Everything here works on native integers; values whose reduced form does not fit are reported
//! as overflow rather than silently wrapped.

mod gcd;
pub use gcd::*;

mod rational;
pub use rational::*;
