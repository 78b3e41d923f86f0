//! Utility functions shared across the library

pub mod phone;
