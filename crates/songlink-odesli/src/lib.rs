// SPDX-License-Identifier: GPL-3.0-or-later

//! Odesli (song.link) client that turns a store URL into a cross-platform
//! share page.
//!
//! Rate limiting and temporary outages are absorbed by a bounded exponential
//! backoff; other failures are returned to the caller on the first response.

pub mod backoff;
pub mod client;
#[cfg(test)]
mod client_tests;
pub mod error;
pub mod models;

pub use backoff::BackoffPolicy;
pub use client::{OdesliClient, OdesliClientBuilder};
pub use error::{OdesliError, Result};
pub use models::LinksResponse;
