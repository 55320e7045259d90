use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use super::external::{decode_query_url, is_external_descriptor, unflatten_path_url};
use super::{FALLBACK_IMAGE_URL, SPOTIFY_PREFIX};
use crate::config::ResolverConfig;
use crate::models::ActivityRecord;

/// Rule that produced a resolved image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedSource {
    /// No image could be derived; the placeholder was used.
    Fallback,
    /// `spotify:<id>` album art.
    Spotify,
    /// Percent-encoded `?url=https...` carried by an external reference.
    ExternalQuery,
    /// External reference with its scheme flattened into a `/https/` segment.
    ExternalPath,
    /// First-party application asset.
    ApplicationAsset,
}

/// Image URL together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    /// Absolute image URL, never empty.
    pub url: String,
    /// Rule responsible for the URL.
    pub source: ResolvedSource,
}

/// Resolve an activity into an image URL using the built-in CDN locations.
pub fn resolve(activity: &ActivityRecord) -> String {
    AssetResolver::default().resolve(activity)
}

/// Maps activity asset descriptors onto absolute image URLs.
///
/// Resolution is total: malformed or unrecognised descriptors degrade to the configured
/// fallback placeholder instead of producing an error.
#[derive(Debug, Clone, Default)]
pub struct AssetResolver {
    config: ResolverConfig,
}

impl AssetResolver {
    /// Create a resolver for the provided configuration.
    ///
    /// A fallback URL that is not itself absolute is replaced by the built-in placeholder so
    /// that every branch keeps returning a usable URL.
    pub fn new(mut config: ResolverConfig) -> Self {
        match absolute_url(&config.fallback_image_url) {
            Some(url) => config.fallback_image_url = url,
            None => {
                warn!(
                    fallback = %config.fallback_image_url,
                    "configured fallback image is not an absolute url, using built-in placeholder"
                );
                config.fallback_image_url = FALLBACK_IMAGE_URL.to_string();
            }
        }
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Placeholder shared by every failure branch and by render-time load failures.
    pub fn fallback_url(&self) -> &str {
        &self.config.fallback_image_url
    }

    /// Resolve an activity into an image URL.
    pub fn resolve(&self, activity: &ActivityRecord) -> String {
        self.resolve_with_source(activity).url
    }

    /// Resolve an activity and report which rule produced the URL.
    pub fn resolve_with_source(&self, activity: &ActivityRecord) -> ResolvedImage {
        let resolved =
            self.resolve_descriptor(activity.asset_descriptor(), activity.application_id());
        debug!(
            activity = %activity.id,
            source = ?resolved.source,
            url = %resolved.url,
            "resolved activity image"
        );
        resolved
    }

    /// Resolve a raw descriptor and optional application id.
    ///
    /// Rules are tried in a fixed order because descriptor prefixes overlap on malformed input:
    /// Spotify ids first, then external references, then first-party application assets.
    /// The winning URL is returned in its serialised form, so characters such as spaces come
    /// back percent-encoded.
    pub fn resolve_descriptor(
        &self,
        descriptor: Option<&str>,
        application_id: Option<&str>,
    ) -> ResolvedImage {
        let Some(descriptor) = descriptor.filter(|value| !value.is_empty()) else {
            return self.fallback();
        };

        let candidate = self
            .spotify_image(descriptor)
            .or_else(|| external_image(descriptor))
            .or_else(|| self.application_image(descriptor, application_id));

        let Some(image) = candidate else {
            return self.fallback();
        };

        match absolute_url(&image.url) {
            Some(url) => ResolvedImage { url, ..image },
            None => {
                debug!(url = %image.url, "derived image url is not absolute, using fallback");
                self.fallback()
            }
        }
    }

    fn fallback(&self) -> ResolvedImage {
        ResolvedImage {
            url: self.config.fallback_image_url.clone(),
            source: ResolvedSource::Fallback,
        }
    }

    fn spotify_image(&self, descriptor: &str) -> Option<ResolvedImage> {
        let id = descriptor.strip_prefix(SPOTIFY_PREFIX)?;
        Some(ResolvedImage {
            url: join_base(&self.config.spotify_image_base, id),
            source: ResolvedSource::Spotify,
        })
    }

    fn application_image(
        &self,
        descriptor: &str,
        application_id: Option<&str>,
    ) -> Option<ResolvedImage> {
        let application_id = application_id.filter(|value| !value.is_empty())?;
        Some(ResolvedImage {
            url: format!(
                "{}.png",
                join_base(
                    &self.config.application_asset_base,
                    &format!("{application_id}/{descriptor}")
                )
            ),
            source: ResolvedSource::ApplicationAsset,
        })
    }
}

fn external_image(descriptor: &str) -> Option<ResolvedImage> {
    if !is_external_descriptor(descriptor) {
        return None;
    }

    if let Some(url) = decode_query_url(descriptor).filter(|url| absolute_url(url).is_some()) {
        return Some(ResolvedImage {
            url,
            source: ResolvedSource::ExternalQuery,
        });
    }

    unflatten_path_url(descriptor).map(|url| ResolvedImage {
        url,
        source: ResolvedSource::ExternalPath,
    })
}

fn join_base(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

fn absolute_url(value: &str) -> Option<String> {
    Url::parse(value)
        .ok()
        .filter(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        })
        .map(String::from)
}
