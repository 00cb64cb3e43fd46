//! LINE Messaging API gateway: a pre-configured HTTP client (base URL, bearer token, JSON
//! content type) and pass-through reply, push, multicast, broadcast and narrowcast calls.

pub mod client;
pub mod config;
pub mod messaging;

pub use client::LineClient;
pub use config::{BotSettings, Config, ConfigError};
pub use messaging::{MessageEndpoint, MessagingError, MessagingService};
