mod api;
pub mod args;
pub mod commands;
mod config;
mod connect;
mod error;
pub mod model;
pub mod store;
mod utils;


pub use api::{client, BudgetApi, Mode, TestClient};
pub use config::Config;
pub use connect::{Connect, ConnectOptions, TellerEnvironment};
pub use error::Error;
pub use error::Result;
