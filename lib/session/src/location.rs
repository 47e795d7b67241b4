//! Browser location access.
//!
//! [`LocationPort`] is the only way session code touches the window's URL and
//! history. [`MemoryLocation`] keeps a history stack in memory for hosts
//! without a browser.

use rootcause::prelude::Report;

use crate::error::SessionError;

/// Read and mutate the current page location.
pub trait LocationPort {
    /// Returns the full current URL.
    fn href(&self) -> Result<String, Report<SessionError>>;

    /// Replaces the current history entry without navigating or reloading.
    fn replace_url(&mut self, url: &str) -> Result<(), Report<SessionError>>;

    /// Navigates the whole page to `url`.
    fn assign(&mut self, url: &str) -> Result<(), Report<SessionError>>;

    /// Reloads the current page, discarding in-memory state.
    fn reload(&mut self) -> Result<(), Report<SessionError>>;

    /// Goes back one history entry.
    fn back(&mut self) -> Result<(), Report<SessionError>>;
}

/// In-memory history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    entries: Vec<String>,
    current: usize,
    reloads: usize,
}

impl MemoryLocation {
    /// Starts a history containing a single entry.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            entries: vec![url.into()],
            current: 0,
            reloads: 0,
        }
    }

    /// Starts a history from several entries, positioned on the last one.
    ///
    /// # Panics
    ///
    /// Panics if `entries` is empty.
    #[must_use]
    pub fn with_history<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();
        assert!(!entries.is_empty(), "history needs at least one entry");
        let current = entries.len() - 1;
        Self {
            entries,
            current,
            reloads: 0,
        }
    }

    /// The URL of the current entry.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.entries[self.current]
    }

    /// Number of entries in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// How many times the page was reloaded.
    #[must_use]
    pub fn reloads(&self) -> usize {
        self.reloads
    }
}

impl LocationPort for MemoryLocation {
    fn href(&self) -> Result<String, Report<SessionError>> {
        Ok(self.current().to_string())
    }

    fn replace_url(&mut self, url: &str) -> Result<(), Report<SessionError>> {
        self.entries[self.current] = url.to_string();
        Ok(())
    }

    fn assign(&mut self, url: &str) -> Result<(), Report<SessionError>> {
        self.entries.truncate(self.current + 1);
        self.entries.push(url.to_string());
        self.current += 1;
        Ok(())
    }

    fn reload(&mut self) -> Result<(), Report<SessionError>> {
        self.reloads += 1;
        Ok(())
    }

    fn back(&mut self) -> Result<(), Report<SessionError>> {
        self.current = self.current.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_keeps_history_length() {
        let mut loc = MemoryLocation::with_history(["https://a/", "https://b/"]);
        loc.replace_url("https://c/").expect("replace");
        assert_eq!(loc.len(), 2);
        assert_eq!(loc.current(), "https://c/");
        assert_eq!(loc.entries()[0], "https://a/");
    }

    #[test]
    fn assign_pushes_and_drops_forward_entries() {
        let mut loc = MemoryLocation::with_history(["https://a/", "https://b/"]);
        loc.back().expect("back");
        loc.assign("https://c/").expect("assign");
        assert_eq!(loc.entries(), ["https://a/", "https://c/"]);
        assert_eq!(loc.current(), "https://c/");
    }

    #[test]
    fn back_stops_at_first_entry() {
        let mut loc = MemoryLocation::new("https://a/");
        loc.back().expect("back");
        assert_eq!(loc.current(), "https://a/");
    }

    #[test]
    fn reload_is_counted() {
        let mut loc = MemoryLocation::new("https://a/");
        loc.reload().expect("reload");
        loc.reload().expect("reload");
        assert_eq!(loc.reloads(), 2);
        assert_eq!(loc.current(), "https://a/");
    }
}
