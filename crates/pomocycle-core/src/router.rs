//! Page navigation.
//!
//! The router owns every page controller and tracks which one is active.
//! Switching pages runs the destination's `enter` synchronously before it
//! starts receiving events.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouterError;
use crate::pages::{PageContext, PageController};

/// Stable page addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKey {
    Timer,
    Settings,
}

impl PageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKey::Timer => "timer",
            PageKey::Settings => "settings",
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Router {
    pages: Vec<Box<dyn PageController>>,
    current: usize,
}

impl Router {
    /// The first page becomes the current one.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NoPages`] if `pages` is empty.
    pub fn new(pages: Vec<Box<dyn PageController>>) -> Result<Self, RouterError> {
        if pages.is_empty() {
            return Err(RouterError::NoPages);
        }
        Ok(Self { pages, current: 0 })
    }

    pub fn current_key(&self) -> PageKey {
        self.pages[self.current].key()
    }

    pub fn current(&self) -> &dyn PageController {
        self.pages[self.current].as_ref()
    }

    pub fn current_mut(&mut self) -> &mut dyn PageController {
        self.pages[self.current].as_mut()
    }

    /// Enter the page registered under `key` and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::UnknownPage`] if no page has that key; the
    /// current page is left unchanged.
    pub fn navigate(&mut self, key: PageKey, ctx: &mut PageContext) -> Result<(), RouterError> {
        let index = self
            .pages
            .iter()
            .position(|p| p.key() == key)
            .ok_or(RouterError::UnknownPage(key))?;
        debug!(from = %self.current_key(), to = %key, "navigating");
        self.pages[index].enter(ctx);
        self.current = index;
        Ok(())
    }
}
