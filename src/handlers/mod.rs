//! HTTP handlers, one module per resource.

pub mod boxes;
pub mod contract;
pub mod orders;
pub mod stock;
