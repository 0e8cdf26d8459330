//! File I/O operations for observed documents.
//!
//! This module loads YAML, JSON and JSON Lines documents from disk or stdin
//! as `Value` trees.

pub mod loader;
