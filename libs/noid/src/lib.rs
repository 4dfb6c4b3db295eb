//! # noid-core
//!
//! Compact, checkable opaque identifiers minted from a textual template.
//!
//! ## Template Format
//!
//! `{prefix}.{generator}{mask}{k?}`
//!
//! - `prefix`: literal text at the start of every identifier (may be empty)
//! - `generator`: `r` (random), `s` (sequential), `z` (sequential, unbounded)
//! - `mask`: one or more of `e` (any alphabet symbol) and `d` (digit)
//! - `k`: append a check symbol
//!
//! Examples:
//! - `bc.sdd` mints `bc00` through `bc99`
//! - `bc.sdk` mints `bc03` for sequence value 0
//! - `ark.zeedk` never runs out; identifiers grow past the mask width
//!
//! The engine is pure: callers own the sequence counter and hand each value
//! to [`Template::mint`]. Identifiers are checked with
//! [`Template::is_valid`] and mapped back to their sequence value with
//! [`Template::decode`].
//!
//! ```
//! use noid_core::Template;
//!
//! let template = Template::parse("bc.sdk").unwrap();
//! let id = template.mint(0).unwrap();
//! assert_eq!(id, "bc03");
//! assert!(template.is_valid(&id));
//! assert!(!template.is_valid("bc04"));
//! ```

mod alphabet;
mod error;
mod mint;
mod template;
mod validate;

pub use alphabet::{Alphabet, BETANUMERIC, DECIMAL_RADIX};
pub use error::{TemplateError, ValidationError};
pub use template::{Capacity, CharClass, Descriptor, Generator, Template};
