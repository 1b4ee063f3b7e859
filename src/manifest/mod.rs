//! Slice manifest
//!
//! The manifest is a TOML document listing the source images to slice and
//! the output rules applied to each of them.

mod parser;
pub mod patterns;

pub use parser::Manifest;
