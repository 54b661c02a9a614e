//! Operational core of the normalization pipeline: protected-span scanning,
//! the placeholder vault, the ordered rule runner and the provenance log.

pub mod log;
pub mod pipeline;
pub mod spans;
pub mod vault;
