pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod load;
pub mod model;
pub mod transform;
