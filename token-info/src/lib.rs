mod app;
pub mod cli;
mod client;
mod error;
mod logs;
mod settings;

pub use app::run;
pub use client::{token_info_calls, ClientConfig, MulticallApi, Scheme, TokenInfoClient};
pub use error::Error;
pub use logs::init_logs;
pub use settings::Settings;
