//! Command implementations.

pub mod fetch;
pub mod predict;
pub mod serve;
pub mod train;
pub mod validate;
