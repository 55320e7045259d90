//! Static work-history entries shown beside the activity card.

use serde::Serialize;

/// Annotation rendered as superscript inside a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Superscript {
  /// Superscript text.
  pub text: String,
  /// Character offset in the description where the superscript is inserted.
  pub position: usize,
}

/// One past or present team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamEntry {
  /// Company or studio name.
  pub company: String,
  /// Human readable period, e.g. `2025 - Present`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub period: Option<String>,
  /// Free-form description of the role.
  pub description: String,
  /// Superscripts placed inside the description.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub superscripts: Vec<Superscript>,
}

/// Piece of a description ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DescriptionSegment {
  /// Plain text.
  Text(String),
  /// Superscript annotation.
  Superscript(String),
}

impl TeamEntry {
  /// Split the description into plain text and superscript segments.
  ///
  /// Positions count characters and are clamped to the description length; superscripts
  /// sharing a position keep their declaration order.
  pub fn description_segments(&self) -> Vec<DescriptionSegment> {
    let mut marks: Vec<&Superscript> = self.superscripts.iter().collect();
    marks.sort_by_key(|mark| mark.position);

    let mut segments = Vec::with_capacity(marks.len() * 2 + 1);
    let mut cursor = 0;
    for mark in marks {
      let offset = byte_offset(&self.description, mark.position);
      if offset > cursor {
        segments.push(DescriptionSegment::Text(
          self.description[cursor..offset].to_string(),
        ));
        cursor = offset;
      }
      segments.push(DescriptionSegment::Superscript(mark.text.clone()));
    }

    if cursor < self.description.len() {
      segments.push(DescriptionSegment::Text(self.description[cursor..].to_string()));
    }
    segments
  }
}

fn byte_offset(text: &str, position: usize) -> usize {
  text
    .char_indices()
    .nth(position)
    .map_or(text.len(), |(offset, _)| offset)
}

/// Work history in display order, most recent first.
pub fn team_entries() -> Vec<TeamEntry> {
  vec![
    TeamEntry {
      company: "Repixelx Studio".into(),
      period: Some("2025 - Present".into()),
      description: "In Studio i works on diffrent-diffrent freelance project like web-app, e-commerce, product landing page, brand website, etc.".into(),
      superscripts: Vec::new(),
    },
    TeamEntry {
      company: "Agrofix".into(),
      period: Some("2025 - 2025".into()),
      description: "First full-time design hire as full-stack intern. i have to build diffrent-diffrent full-stackproduct.".into(),
      superscripts: Vec::new(),
    },
  ]
}
