//! Business logic extracted from HTTP handlers for testability and reuse.

pub mod todos;
