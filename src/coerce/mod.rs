//! Coerce module - Turns raw directive strings into typed values.
//!
//! Directive values always arrive as text. The rule chain decides, in a fixed
//! order, which typed value a string stands for.

mod coerce;

#[cfg(test)]
mod coerce_test;

pub use coerce::*;
