//! Utility modules: persistence.

pub mod persistence;
