//! Footprint Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Footprint
//! import pipeline. It includes:
//!
//! - **Geometry**: Planar points, bounding boxes and geographic coordinates ([`geometry`] module)
//! - **Identifiers**: Handles for new and existing points and polygons ([`identifier`] module)
//! - **Dataset**: Read-only access to an existing map dataset ([`dataset`] module)
//! - **Projection**: Planar to geographic conversion ([`projection`] module)

pub mod dataset;
pub mod geometry;
pub mod identifier;
pub mod projection;
