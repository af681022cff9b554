//! Configuration for the render-performance advisor.

mod config;

pub use config::*;
