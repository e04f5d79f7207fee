pub mod config;
pub mod detail;
pub mod recipe;

pub use config::*;
pub use detail::*;
pub use recipe::*;
