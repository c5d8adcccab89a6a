// SPDX-License-Identifier: GPL-3.0-or-later

//! iTunes Search API client used as the album catalog.
//!
//! Only album-level records (`wrapperType == "collection"`) that carry a
//! collection URL are turned into [`CandidateAlbum`](songlink_domain::CandidateAlbum)s.
//! Searches are single-shot: failures are reported to the caller without retrying.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ItunesClient, ItunesClientBuilder};
pub use error::{ItunesError, Result};
pub use models::{SearchQuery, SearchResponse, SearchResult};
