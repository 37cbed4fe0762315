pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod model;
pub mod operations;
pub mod regions;
pub mod tessellation;

pub use error::{AbavoError, Result};
