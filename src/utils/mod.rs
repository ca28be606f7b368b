//! Utility functions

pub mod navigate;

pub use navigate::Field;
