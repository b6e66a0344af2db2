//! # Kiln Baker
//!
//! The task-graph baking engine. A bake feeds a [`Model`](kiln_core::model::Model)
//! through a directed acyclic graph of typed jobs that compute missing
//! normals and tangents (for meshes and blendshapes), build draw-ready
//! mesh buffers, and reassemble everything into a new model. The input
//! model is never mutated.
//!
//! [`Baker`] wires the standard graph; the [`engine`] module is the
//! reusable graph machinery it runs on.

mod baker;
pub mod engine;
pub mod geometry;
pub mod jobs;
pub mod types;

pub use baker::{BakeResult, Baker};
