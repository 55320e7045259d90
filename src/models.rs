//! Presence payload records as published by the presence-aggregation service.

use serde::{Deserialize, Serialize};

/// Image and hover-text assets attached to an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityAssets {
  /// Prefix-tagged descriptor of the main activity image.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub large_image: Option<String>,
  /// Hover text for the main image.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub large_text: Option<String>,
  /// Descriptor of the secondary badge image.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub small_image: Option<String>,
  /// Hover text for the badge image.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub small_text: Option<String>,
}

/// Snapshot of one thing the user is currently doing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityRecord {
  /// Opaque identifier, not unique across snapshots.
  #[serde(default)]
  pub id: String,
  /// Display label such as `Spotify` or `Code`.
  #[serde(default)]
  pub name: String,
  /// Numeric activity kind reported by the service.
  #[serde(rename = "type", default)]
  pub kind: u32,
  /// Secondary status line.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  /// Primary status line.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
  /// Identifier of the first-party application, if any.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub application_id: Option<String>,
  /// Image assets published with the activity.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assets: Option<ActivityAssets>,
}

impl ActivityRecord {
  /// Create an activity with the given identifier and display label.
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      ..Self::default()
    }
  }

  /// Attach a main image descriptor.
  pub fn with_asset_descriptor(mut self, descriptor: impl Into<String>) -> Self {
    self.assets.get_or_insert_with(ActivityAssets::default).large_image = Some(descriptor.into());
    self
  }

  /// Attach a first-party application identifier.
  pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
    self.application_id = Some(application_id.into());
    self
  }

  /// Descriptor of the image shown on the activity card.
  pub fn asset_descriptor(&self) -> Option<&str> {
    self.assets.as_ref()?.large_image.as_deref()
  }

  /// First-party application identifier, if any.
  pub fn application_id(&self) -> Option<&str> {
    self.application_id.as_deref()
  }
}

/// Presence data block of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresenceData {
  /// Activities in the order published by the service.
  #[serde(default)]
  pub activities: Vec<ActivityRecord>,
}

/// Envelope delivered by the presence service for each update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PresenceSnapshot {
  /// Whether the service considered the request successful.
  #[serde(default)]
  pub success: bool,
  /// Presence data, absent when the service had nothing to report.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub data: Option<PresenceData>,
}

impl PresenceSnapshot {
  /// Build a successful snapshot carrying the given activities.
  pub fn from_activities(activities: Vec<ActivityRecord>) -> Self {
    Self {
      success: true,
      data: Some(PresenceData { activities }),
    }
  }

  /// Activities carried by the snapshot, `None` when no data block was published.
  pub fn activities(&self) -> Option<&[ActivityRecord]> {
    self.data.as_ref().map(|data| data.activities.as_slice())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_service_payload_and_ignores_unknown_fields() {
    let payload = r#"{
      "success": true,
      "data": {
        "discord_status": "online",
        "activities": [{
          "id": "spotify:1",
          "name": "Spotify",
          "type": 2,
          "details": "Song",
          "state": "Artist",
          "sync_id": "abc",
          "assets": { "large_image": "spotify:ab67", "large_text": "Album" }
        }]
      }
    }"#;

    let snapshot: PresenceSnapshot = serde_json::from_str(payload).expect("payload should parse");
    let activities = snapshot.activities().expect("data block present");
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].kind, 2);
    assert_eq!(activities[0].asset_descriptor(), Some("spotify:ab67"));
    assert_eq!(activities[0].application_id(), None);
  }

  #[test]
  fn snapshot_without_data_has_no_activities() {
    let snapshot: PresenceSnapshot =
      serde_json::from_str(r#"{"success": false}"#).expect("payload should parse");
    assert_eq!(snapshot.activities(), None);
  }

  #[test]
  fn builders_populate_descriptor_and_application() {
    let activity = ActivityRecord::new("1", "Code")
      .with_asset_descriptor("icon")
      .with_application_id("383226320970055681");

    assert_eq!(activity.asset_descriptor(), Some("icon"));
    assert_eq!(activity.application_id(), Some("383226320970055681"));
  }
}
