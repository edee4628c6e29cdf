pub mod cli;
pub mod config;

pub use cli::{Cli, run};
pub use config::{ConfigError, MerchantProfile, PixConfig};
