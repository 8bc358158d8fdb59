//! Data models for the themes library.
//!
//! `Theme` is the one canonical shape every vendor payload is normalized
//! into; `ThemeQuery` is the option map that query keys and the matcher
//! operate on.

mod query;
mod theme;

pub use query::*;
pub use theme::*;
