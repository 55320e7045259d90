//! Presence data sources feeding activity snapshots into the card.
//!
//! The live subscription itself lives outside this crate; anything able to hand over
//! successive [`PresenceSnapshot`] values can drive the card through [`PresenceSource`].

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::models::{ActivityRecord, PresenceSnapshot};

/// Trait describing a finite stream of presence snapshots.
pub trait PresenceSource {
  /// Returns the next snapshot, or `None` once the stream is finished.
  fn next_snapshot(&mut self) -> Result<Option<PresenceSnapshot>, PresenceError>;
}

/// Errors that can occur while reading presence snapshots.
#[derive(Debug)]
pub enum PresenceError {
  /// Failed to open a snapshot file.
  Open {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to read from an open stream.
  Io {
    /// Source I/O error.
    source: std::io::Error,
  },
  /// A line of a JSON-lines stream was not a valid snapshot.
  Parse {
    /// One-based line number of the offending snapshot.
    line: usize,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// A snapshot file was not valid JSON.
  ParseFile {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

/// Replays an in-memory list of snapshots.
#[derive(Debug, Clone, Default)]
pub struct StaticPresence {
  snapshots: VecDeque<PresenceSnapshot>,
}

impl StaticPresence {
  /// Create a source yielding the snapshots in order.
  pub fn new(snapshots: impl IntoIterator<Item = PresenceSnapshot>) -> Self {
    Self {
      snapshots: snapshots.into_iter().collect(),
    }
  }
}

impl PresenceSource for StaticPresence {
  fn next_snapshot(&mut self) -> Result<Option<PresenceSnapshot>, PresenceError> {
    Ok(self.snapshots.pop_front())
  }
}

/// Reads one JSON snapshot per line; blank lines are skipped.
#[derive(Debug)]
pub struct JsonLinesPresence<R> {
  reader: R,
  line: usize,
  buffer: String,
}

impl<R: BufRead> JsonLinesPresence<R> {
  /// Wrap a buffered reader.
  pub fn new(reader: R) -> Self {
    Self {
      reader,
      line: 0,
      buffer: String::new(),
    }
  }
}

impl JsonLinesPresence<BufReader<File>> {
  /// Open a JSON-lines snapshot file.
  pub fn open(path: impl AsRef<Path>) -> Result<Self, PresenceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PresenceError::Open {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(Self::new(BufReader::new(file)))
  }
}

impl<R: BufRead> PresenceSource for JsonLinesPresence<R> {
  fn next_snapshot(&mut self) -> Result<Option<PresenceSnapshot>, PresenceError> {
    loop {
      self.buffer.clear();
      let read = self
        .reader
        .read_line(&mut self.buffer)
        .map_err(|source| PresenceError::Io { source })?;
      if read == 0 {
        return Ok(None);
      }
      self.line += 1;

      let trimmed = self.buffer.trim();
      if trimmed.is_empty() {
        continue;
      }

      let snapshot = serde_json::from_str(trimmed).map_err(|source| PresenceError::Parse {
        line: self.line,
        source,
      })?;
      debug!(line = self.line, "read presence snapshot");
      return Ok(Some(snapshot));
    }
  }
}

/// Load a single snapshot from a JSON file, typically the server-rendered initial data.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<PresenceSnapshot, PresenceError> {
  let path = path.as_ref();
  let contents = fs::read_to_string(path).map_err(|source| PresenceError::Open {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&contents).map_err(|source| PresenceError::ParseFile {
    path: path.to_path_buf(),
    source,
  })
}

/// Pick the activities to display: live data when it carries a data block, else the initial
/// snapshot's. `None` means neither source has reported yet.
///
/// Live data with an empty activity list still wins over the initial snapshot.
pub fn select_activities<'a>(
  live: Option<&'a PresenceSnapshot>,
  initial: Option<&'a PresenceSnapshot>,
) -> Option<&'a [ActivityRecord]> {
  live
    .and_then(PresenceSnapshot::activities)
    .or_else(|| initial.and_then(PresenceSnapshot::activities))
}

impl std::fmt::Display for PresenceError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Open { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Io { source } => write!(f, "failed to read presence stream: {}", source),
      Self::Parse { line, source } => {
        write!(f, "failed to parse presence snapshot on line {}: {}", line, source)
      }
      Self::ParseFile { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for PresenceError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Open { source, .. } | Self::Io { source } => Some(source),
      Self::Parse { source, .. } | Self::ParseFile { source, .. } => Some(source),
    }
  }
}
