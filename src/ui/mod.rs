//! UI components for Trabalhos

pub mod editor;
pub mod preview;
