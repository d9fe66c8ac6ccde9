//! Alephium full node api: client configuration and the endpoints used by this workspace.

mod client;
mod config;
pub mod contracts;
pub mod infos;

pub use client::{Client, API_KEY_HEADER};
pub use config::Config;
