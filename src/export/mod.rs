//! Rendering and printable export of the paper

pub mod logo;
pub mod print;
pub mod render;
