//! API module
//!
//! Contains HTTP request handlers for the problem form, diagram search and
//! health endpoints.

pub mod diagrams;
pub mod health;
pub mod solve;
pub mod utils;
