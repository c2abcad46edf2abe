//! Ingredient text handling.
//!
//! - [`parser`] — splits a free-text ingredient list into raw tokens.
//! - [`normalizer`] — maps raw tokens (aliases, e-numbers) to canonical names.

pub mod normalizer;
pub mod parser;
