pub mod config;
pub mod gateway;
pub mod relay;

pub use config::{ConfigError, RelayConfig};
pub use gateway::{ChatGateway, SerenityGateway, SessionState};
pub use relay::DiscordRelayPlugin;
