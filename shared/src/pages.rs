//! Page content types
//!
//! Copy and layout configuration served per page, sourced from the headless
//! CMS (or built-in defaults when the CMS is unreachable).

use serde::{Deserialize, Serialize};

/// Page copy/layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Free-form UI labels keyed by component
    #[serde(default)]
    pub labels: serde_json::Value,
    /// CSS gradient class list used by the client for the page header
    #[serde(default)]
    pub gradient: String,
}
