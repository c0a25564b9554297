pub mod catalog;
pub mod config;
pub mod gateway;
pub mod http;
pub mod protocol;
pub mod upstream;

pub use config::GatewayConfig;
pub use gateway::Gateway;
