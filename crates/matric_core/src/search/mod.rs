//! Free-text search entry points.
//!
//! # Responsibility
//! - Expose substring search over student name and matric columns.
//! - Keep search result shaping inside core.

pub mod text;
