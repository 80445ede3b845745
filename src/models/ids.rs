//! Playlist identifiers extracted from user input.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Optional `...list=` prefix, the ID itself, then anything non-blank.
static PLAYLIST_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+list=)?([\w-]+)\S*$").expect("valid regex"));

/// The input could not be read as a playlist link or bare playlist ID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid playlist reference: {0:?}")]
pub struct InvalidPlaylistReference(pub String);

/// A validated playlist ID.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Extract a playlist ID from a full playlist URL or a bare ID.
    ///
    /// `https://www.youtube.com/playlist?list=PLabc&index=2` and `PLabc`
    /// both yield `PLabc`. Surrounding whitespace is ignored.
    pub fn extract(reference: &str) -> Result<Self, InvalidPlaylistReference> {
        let reference = reference.trim();
        PLAYLIST_LINK
            .captures(reference)
            .and_then(|caps| caps.get(2))
            .map(|m| Self(m.as_str().to_string()))
            .ok_or_else(|| InvalidPlaylistReference(reference.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaylistId({})", self.0)
    }
}

impl std::str::FromStr for PlaylistId {
    type Err = InvalidPlaylistReference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::extract(s)
    }
}
