//! Messaging gateway: reply, push, multicast, broadcast and narrowcast via the LINE Messaging API.
//!
//! Request and response payloads are opaque JSON. The gateway forwards the caller's document
//! verbatim and hands the upstream response back unmodified.

mod endpoint;
mod service;

pub use endpoint::MessageEndpoint;
pub use service::{MessagingError, MessagingService};
