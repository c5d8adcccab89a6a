// SPDX-License-Identifier: GPL-3.0-or-later
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("either a free-text query or both artist and album are required")]
    MissingInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CandidateError {
    #[error("candidate '{0}' has no source URL")]
    MissingSourceUrl(String),
}

// ============================================================================
// Query
// ============================================================================

/// What the user asked for.
///
/// Either a free-text query, or an artist together with an album. Artist and
/// album may accompany a free-text query as scoring hints; the free text still
/// drives the catalog search term in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    artist: Option<String>,
    album: Option<String>,
    text: Option<String>,
}

impl Query {
    /// Build a query, treating blank fields as absent.
    pub fn new(
        artist: Option<String>,
        album: Option<String>,
        text: Option<String>,
    ) -> Result<Self, QueryError> {
        let artist = non_blank(artist);
        let album = non_blank(album);
        let text = non_blank(text);

        if text.is_none() && (artist.is_none() || album.is_none()) {
            return Err(QueryError::MissingInput);
        }

        Ok(Self {
            artist,
            album,
            text,
        })
    }

    pub fn artist_album(
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Result<Self, QueryError> {
        Self::new(Some(artist.into()), Some(album.into()), None)
    }

    pub fn free_text(text: impl Into<String>) -> Result<Self, QueryError> {
        Self::new(None, None, Some(text.into()))
    }

    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Term sent to the catalog: the free text, or "{artist} {album}".
    pub fn search_term(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => format!(
                "{} {}",
                self.artist.as_deref().unwrap_or_default(),
                self.album.as_deref().unwrap_or_default()
            )
            .trim()
            .to_string(),
        }
    }

    /// Human-readable description of the query for status output.
    pub fn label(&self) -> String {
        match &self.text {
            Some(text) => text.clone(),
            None => format!(
                "{} — {}",
                self.artist.as_deref().unwrap_or_default(),
                self.album.as_deref().unwrap_or_default()
            ),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Candidates
// ============================================================================

/// An album-level record returned by the catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAlbum {
    title: String,
    artist: String,
    source_url: String,
    release_date: Option<NaiveDate>,
    collection_id: Option<u64>,
}

impl CandidateAlbum {
    /// A candidate must carry a resolvable source URL.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Result<Self, CandidateError> {
        let title = title.into();
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(CandidateError::MissingSourceUrl(title));
        }

        Ok(Self {
            title,
            artist: artist.into(),
            source_url,
            release_date: None,
            collection_id: None,
        })
    }

    pub fn with_release_date(mut self, release_date: Option<NaiveDate>) -> Self {
        self.release_date = release_date;
        self
    }

    pub fn with_collection_id(mut self, collection_id: Option<u64>) -> Self {
        self.collection_id = collection_id;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    pub fn collection_id(&self) -> Option<u64> {
        self.collection_id
    }
}

// ============================================================================
// Resolved links
// ============================================================================

/// Cross-platform share URL produced by the link resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedLink(String);

impl ResolvedLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
