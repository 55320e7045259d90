//! View model for the "currently doing" activity card.

use serde::Serialize;
use tracing::{debug, info};

use crate::asset_url::AssetResolver;
use crate::models::{ActivityRecord, PresenceSnapshot};
use crate::presence::{PresenceError, PresenceSource, select_activities};

/// Width and height hint, in pixels, for activity images.
pub const CARD_IMAGE_SIZE: u32 = 500;

/// Image shown on an activity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardImage {
  /// URL currently used as the image source.
  pub src: String,
  /// Alternative text, the activity name.
  pub alt: String,
  /// Width hint in pixels.
  pub width: u32,
  /// Height hint in pixels.
  pub height: u32,
  /// Placeholder to switch to when `src` fails to load.
  pub fallback_src: String,
}

impl CardImage {
  /// Switch to the placeholder after the image failed to load.
  ///
  /// Returns `true` when the source changed. Calling it again once the placeholder is in
  /// place is a no-op so a broken placeholder cannot loop.
  pub fn on_load_error(&mut self) -> bool {
    if self.src == self.fallback_src {
      return false;
    }
    debug!(failed = %self.src, "activity image failed to load, using placeholder");
    self.src.clone_from(&self.fallback_src);
    true
  }
}

/// One rendered activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCard {
  /// List key combining the activity id and its position.
  pub key: String,
  /// Heading line, e.g. `Listening to Spotify`.
  pub heading: String,
  /// Primary status line.
  pub details: Option<String>,
  /// Secondary status line.
  pub state: Option<String>,
  /// Activity image.
  pub image: CardImage,
}

impl ActivityCard {
  /// Build the card entry for the activity at `index`.
  pub fn from_activity(activity: &ActivityRecord, index: usize, resolver: &AssetResolver) -> Self {
    Self {
      key: format!("{}-{}", activity.id, index),
      heading: heading_for(&activity.name),
      details: activity.details.clone(),
      state: activity.state.clone(),
      image: CardImage {
        src: resolver.resolve(activity),
        alt: activity.name.clone(),
        width: CARD_IMAGE_SIZE,
        height: CARD_IMAGE_SIZE,
        fallback_src: resolver.fallback_url().to_string(),
      },
    }
  }
}

/// What the card shows for a given pair of presence inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "activities", rename_all = "snake_case")]
pub enum CardState {
  /// Neither live nor initial data is available yet.
  Loading,
  /// Activity entries in publication order.
  Ready(Vec<ActivityCard>),
}

impl CardState {
  /// Build the card state from an optional activity list.
  pub fn from_activities(activities: Option<&[ActivityRecord]>, resolver: &AssetResolver) -> Self {
    match activities {
      Some(activities) => Self::Ready(
        activities
          .iter()
          .enumerate()
          .map(|(index, activity)| ActivityCard::from_activity(activity, index, resolver))
          .collect(),
      ),
      None => Self::Loading,
    }
  }

  /// Build the card state from live data, falling back to the initial snapshot.
  pub fn from_snapshots(
    live: Option<&PresenceSnapshot>,
    initial: Option<&PresenceSnapshot>,
    resolver: &AssetResolver,
  ) -> Self {
    Self::from_activities(select_activities(live, initial), resolver)
  }
}

/// Heading text for an activity name.
pub fn heading_for(name: &str) -> String {
  match name {
    "Spotify" => format!("Listening to {name}"),
    "Code" => format!("Doing {name}"),
    _ => name.to_string(),
  }
}

/// Drive the card from a presence source until it is exhausted.
///
/// Every snapshot is rendered independently against the initial data and handed to
/// `on_update`. Returns the number of snapshots processed.
pub fn follow_presence<S, F>(
  source: &mut S,
  initial: Option<&PresenceSnapshot>,
  resolver: &AssetResolver,
  mut on_update: F,
) -> Result<usize, PresenceError>
where
  S: PresenceSource + ?Sized,
  F: FnMut(CardState),
{
  let mut processed = 0;
  while let Some(snapshot) = source.next_snapshot()? {
    on_update(CardState::from_snapshots(Some(&snapshot), initial, resolver));
    processed += 1;
  }
  info!(snapshots = processed, "presence stream finished");
  Ok(processed)
}
