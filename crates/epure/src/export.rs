//! Export formats.

pub mod svg;
