//! Sales Dashboard - CSV sales reporting core
//!
//! Loads a sales export, filters it by year and product line, and computes the
//! metrics, tables and map rows shown by the dashboard.

pub mod config;
pub mod data;
pub mod format;
pub mod geo;
pub mod stats;
