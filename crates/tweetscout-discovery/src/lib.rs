//! Discovery Adapter: wraps the external content-discovery gateway.
//!
//! Owns the authenticated session (created lazily, invalidated on auth
//! failure), selects the transport variant at construction, and exposes
//! bounded tweet search plus per-author influence lookup with a timeout.

mod client;
mod error;
mod normalize;
mod retry;
mod session;
mod transport;
mod types;

pub use client::{DiscoveryClient, DiscoveryConfig};
pub use error::DiscoveryError;
pub use normalize::normalize_candidate;
pub use transport::TransportKind;
pub use types::{AuthorInfluence, RawTweet};
