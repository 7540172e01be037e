//! Directive module - Raw directive overrides and the host facts that gate them.
//!
//! Directives are collected from `KEY=VALUE` pairs, directive files, or a
//! node attribute set. Whether a node accepts them at all is decided by
//! [`supports_overrides`].

mod attributes;
mod directives;
mod eligibility;
mod error;

pub use attributes::*;
pub use directives::*;
pub use eligibility::*;
pub use error::*;
