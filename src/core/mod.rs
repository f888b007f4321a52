//! Core functionality for the document model, persistence, and configuration

pub mod config;
pub mod document;
pub mod session;
pub mod store;
