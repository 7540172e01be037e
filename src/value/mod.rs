//! Value module - In-memory representation of YAML/JSON documents.
//!
//! Configuration documents and coerced directive values share this model.

mod value;

pub use value::*;
