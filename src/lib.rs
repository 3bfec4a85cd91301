//! Schemacanvas - schema store and connector geometry for a visual
//! database schema designer.
//!
//! Owns the canonical entity graph of a schema diagram (tables, columns,
//! relationships and reusable base-table templates), keeps it consistent
//! under every edit, and computes the geometry a canvas needs to draw
//! relationship lines between tables. Rendering, drag handling and file
//! transport stay with the embedding application.

pub mod core;
