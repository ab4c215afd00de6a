//! SccScope - directed graph engine with depth-first forests and strongly
//! connected components
//!
//! This crate provides labeled digraphs and rooted trees over arena-owned
//! vertices, an explicit-stack depth-first forest builder that classifies
//! every arc, and Tarjan's low-link method for the component partition.

pub mod export;
pub mod graph;
pub mod observer;
