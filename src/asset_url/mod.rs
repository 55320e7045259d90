//! Resolution of presence asset descriptors into displayable image URLs.
//!
//! Descriptors published by the presence service are prefix-tagged tokens whose encoding
//! depends on the platform that produced the activity. The submodules split the work so each
//! encoding can be tested on its own: `external` understands proxied `mp:external` references,
//! `resolve` applies the fixed rule order and guarantees a usable URL comes out the other end.

mod external;
mod resolve;

pub use external::{decode_query_url, is_external_descriptor, unflatten_path_url};
pub use resolve::{AssetResolver, ResolvedImage, ResolvedSource, resolve};

/// Placeholder image used whenever no image can be derived or the derived image fails to load.
pub const FALLBACK_IMAGE_URL: &str =
    "https://i.pinimg.com/736x/c0/0f/07/c00f07cdae11db49e00f55b011ccc4f3.jpg";

/// Base of the Spotify album-art CDN.
pub const SPOTIFY_IMAGE_BASE: &str = "https://i.scdn.co/image";

/// Base of the first-party application asset CDN.
pub const APPLICATION_ASSET_BASE: &str = "https://cdn.discordapp.com/app-assets";

/// Descriptor prefix marking a Spotify image identifier.
pub const SPOTIFY_PREFIX: &str = "spotify:";
