//! UI components.

pub mod crafting_graph;
