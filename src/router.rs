//! Relics wiki tab router
//!
//! The wiki is one document with a sidebar of selectors and one pane per
//! page. Exactly one pane is visible and exactly one selector is highlighted
//! at a time. The sidebar search hides selectors whose label does not
//! contain the query, case-insensitively.

use crate::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A wiki page: its sidebar selector and pane content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Key used by selectors and in-content links
    pub key: String,
    /// Sidebar label
    pub label: String,
    /// Pane content
    #[serde(default)]
    pub body: String,
}

/// Page manifest as loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub pages: Vec<Page>,
    /// Page shown on load; defaults to the first page
    #[serde(default)]
    pub initial: Option<String>,
}

/// Outcome of a successful navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub key: String,
    /// The view should jump back to the top of the page
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone)]
pub struct TabRouter {
    pages: Vec<Page>,
    active: usize,
    query: String,
}

impl TabRouter {
    pub fn new(pages: Vec<Page>, initial: Option<&str>) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::ConfigError("wiki needs at least one page".into()));
        }
        let mut seen = HashSet::new();
        for p in &pages {
            if !seen.insert(p.key.as_str()) {
                return Err(Error::ConfigError(format!("duplicate page key '{}'", p.key)));
            }
        }

        let active = match initial {
            Some(key) => pages
                .iter()
                .position(|p| p.key == key)
                .ok_or_else(|| Error::ConfigError(format!("unknown initial page '{}'", key)))?,
            None => 0,
        };

        Ok(Self {
            pages,
            active,
            query: String::new(),
        })
    }

    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        Self::new(manifest.pages, manifest.initial.as_deref())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_manifest(serde_json::from_str(json)?)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The page whose pane is visible and whose selector is highlighted.
    pub fn active(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active().key == key
    }

    /// Show the pane for `key` and highlight its selector. Unknown keys
    /// change nothing and return `None`.
    pub fn select(&mut self, key: &str) -> Option<Navigation> {
        let Some(idx) = self.pages.iter().position(|p| p.key == key) else {
            debug!("ignoring navigation to unknown page '{}'", key);
            return None;
        };
        self.active = idx;
        debug!("navigated to '{}'", key);
        Some(Navigation {
            key: key.to_string(),
            scroll_to_top: true,
        })
    }

    /// In-content links navigate exactly like sidebar selectors.
    pub fn follow_link(&mut self, key: &str) -> Option<Navigation> {
        self.select(key)
    }

    pub fn set_filter(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    pub fn filter(&self) -> &str {
        &self.query
    }

    pub fn is_shown(&self, page: &Page) -> bool {
        page.label.to_lowercase().contains(&self.query)
    }

    /// Selectors that survive the current filter, in sidebar order.
    pub fn visible_selectors(&self) -> Vec<&Page> {
        self.pages.iter().filter(|p| self.is_shown(p)).collect()
    }
}
