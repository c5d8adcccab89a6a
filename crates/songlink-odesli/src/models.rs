// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// Subset of the `/links` response the resolver relies on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LinksResponse {
    /// Share page aggregating every platform's link.
    #[serde(default)]
    pub page_url: Option<String>,
    /// Identifier of the entity the input URL resolved to.
    #[serde(default)]
    pub entity_unique_id: Option<String>,
}

impl LinksResponse {
    /// Page URL, treating an empty string as missing.
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref().filter(|url| !url.trim().is_empty())
    }
}
