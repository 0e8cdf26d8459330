//! Observed values and their classification.

pub mod node;
pub mod observe;
pub mod shape;
