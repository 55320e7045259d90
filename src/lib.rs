#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_url;
pub mod card;
pub mod config;
pub mod logging;
pub mod models;
pub mod presence;
pub mod team;

pub use asset_url::{AssetResolver, ResolvedImage, ResolvedSource, resolve};
pub use card::{ActivityCard, CardImage, CardState};
pub use config::ResolverConfig;
pub use models::{ActivityAssets, ActivityRecord, PresenceSnapshot};
pub use presence::{JsonLinesPresence, PresenceError, PresenceSource, StaticPresence};
