mod platform;
pub use platform::*;
mod command;
pub use command::*;
mod config;
pub use config::*;
mod manager;
pub use manager::*;
