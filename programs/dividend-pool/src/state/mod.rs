pub mod config;
pub mod pool;
pub mod registry;

pub use config::*;
pub use pool::*;
pub use registry::*;
