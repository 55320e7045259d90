use activity_card::asset_url::FALLBACK_IMAGE_URL;
use activity_card::{ActivityAssets, ActivityRecord, AssetResolver, ResolvedSource, resolve};

fn with_descriptor(descriptor: &str) -> ActivityRecord {
    ActivityRecord::new("activity", "Activity").with_asset_descriptor(descriptor)
}

#[test]
fn empty_record_resolves_to_fallback() {
    assert_eq!(resolve(&ActivityRecord::default()), FALLBACK_IMAGE_URL);
}

#[test]
fn assets_without_large_image_resolve_to_fallback() {
    let mut activity = ActivityRecord::new("1", "Game").with_application_id("999");
    activity.assets = Some(ActivityAssets {
        small_image: Some("badge".into()),
        ..ActivityAssets::default()
    });

    assert_eq!(resolve(&activity), FALLBACK_IMAGE_URL);
}

#[test]
fn spotify_descriptor() {
    assert_eq!(
        resolve(&with_descriptor("spotify:abc123")),
        "https://i.scdn.co/image/abc123"
    );
}

#[test]
fn external_flattened_path_descriptor() {
    assert_eq!(
        resolve(&with_descriptor(
            "mp:external/xyz/https/cdn.example.com/img.png"
        )),
        "https://cdn.example.com/img.png"
    );
}

#[test]
fn external_encoded_query_descriptor() {
    assert_eq!(
        resolve(&with_descriptor(
            "mp:external/...%3Furl%3Dhttps%3A%2F%2Fexample.com%2Fa.png"
        )),
        "https://example.com/a.png"
    );
}

#[test]
fn application_asset_descriptor() {
    let activity = with_descriptor("icon1").with_application_id("999");
    assert_eq!(
        resolve(&activity),
        "https://cdn.discordapp.com/app-assets/999/icon1.png"
    );
}

#[test]
fn unknown_prefix_without_application_resolves_to_fallback() {
    assert_eq!(resolve(&with_descriptor("unknown-prefix")), FALLBACK_IMAGE_URL);
}

#[test]
fn resolution_is_repeatable() {
    let resolver = AssetResolver::default();
    let inputs = [
        with_descriptor("spotify:abc123"),
        with_descriptor("mp:external/a/https/host.example/https/b.png"),
        with_descriptor("icon1").with_application_id("999"),
        with_descriptor("%%%"),
        ActivityRecord::default(),
    ];

    for activity in &inputs {
        let first = resolver.resolve_with_source(activity);
        let second = resolver.resolve_with_source(activity);
        assert_eq!(first, second);
        assert!(!first.url.is_empty());
    }
}

#[test]
fn hostile_descriptors_never_escape_the_fallback_contract() {
    let resolver = AssetResolver::default();
    let descriptors = [
        "mp:external",
        "mp:external/https/",
        "mp:external/%3Furl%3Dhttps%3A",
        "mp:external/%3Furl%3Dhttps%3A%E0%A4%A",
        "mp:external/x/https/ spaced host/a.png",
        "spotify:",
        "\u{0}\u{fffd}",
    ];

    for descriptor in descriptors {
        let image = resolver.resolve_with_source(&with_descriptor(descriptor));
        assert!(
            image.url.starts_with("https://"),
            "{descriptor:?} resolved to {:?}",
            image.url
        );
        if image.source == ResolvedSource::Fallback {
            assert_eq!(image.url, FALLBACK_IMAGE_URL);
        }
    }
}

#[test]
fn malformed_escapes_in_encoded_query_resolve_to_fallback() {
    for descriptor in [
        "mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa%ZZ.png",
        "mp:external/x%3Furl%3Dhttps%3A%2F%2Fhost.example%2Fa%.png",
    ] {
        assert_eq!(resolve(&with_descriptor(descriptor)), FALLBACK_IMAGE_URL);
    }
}

#[test]
fn resolved_urls_never_contain_raw_spaces() {
    assert_eq!(
        resolve(&with_descriptor("spotify:a b")),
        "https://i.scdn.co/image/a%20b"
    );
    assert_eq!(
        resolve(&with_descriptor("icon 1").with_application_id("999")),
        "https://cdn.discordapp.com/app-assets/999/icon%201.png"
    );
}
