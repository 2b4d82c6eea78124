use url::Url;

use crate::navigation::errors::NavigationError;

const IN_MEMORY_ORIGIN: &str = "https://drive.local";

/// The parts of `window.location` the shell reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Location {
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.search.strip_prefix('?').unwrap_or(&self.search);
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Path plus query string with `key` removed, keeping every other parameter.
    pub fn without_query_param(&self, key: &str) -> String {
        let query = self.search.strip_prefix('?').unwrap_or(&self.search);
        let kept: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            return self.pathname.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(kept)
            .finish();
        format!("{}?{}", self.pathname, query)
    }
}

impl From<&Url> for Location {
    fn from(url: &Url) -> Self {
        Self {
            pathname: url.path().to_string(),
            search: url.query().map(|q| format!("?{q}")).unwrap_or_default(),
            hash: url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
        }
    }
}

/// Browser location and history, as seen by the shell.
pub trait Browser: Send + 'static {
    fn location(&self) -> Location;

    /// Replace the current history entry. The shell never pushes entries.
    fn replace_state(&mut self, url: &str) -> Result<(), NavigationError>;
}

/// History stack held in memory, for hosts without a DOM and for tests.
#[derive(Debug, Clone)]
pub struct InMemoryBrowser {
    entries: Vec<Url>,
    cursor: usize,
    replace_count: usize,
}

impl InMemoryBrowser {
    /// Open a browser at `url`, which may be absolute or a path like `/home#access_token=...`.
    pub fn new(url: &str) -> Result<Self, NavigationError> {
        let base = Url::parse(IN_MEMORY_ORIGIN)?;
        let first = base.join(url)?;
        Ok(Self {
            entries: vec![first],
            cursor: 0,
            replace_count: 0,
        })
    }

    /// Simulate the user following a link outside the shell: drops forward entries.
    pub fn push_entry(&mut self, url: &str) -> Result<(), NavigationError> {
        let next = self.current().join(url)?;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next);
        self.cursor += 1;
        Ok(())
    }

    /// Move back one entry. Returns false at the start of history.
    /// The host is responsible for delivering the resulting popstate.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    /// Current entry as path, query and fragment.
    pub fn current_url(&self) -> String {
        let location = Location::from(self.current());
        format!("{}{}{}", location.pathname, location.search, location.hash)
    }

    fn current(&self) -> &Url {
        &self.entries[self.cursor]
    }
}

impl Browser for InMemoryBrowser {
    fn location(&self) -> Location {
        Location::from(self.current())
    }

    fn replace_state(&mut self, url: &str) -> Result<(), NavigationError> {
        let next = self.current().join(url)?;
        tracing::debug!(from = %self.current_url(), to = %next, "history.replaceState");
        self.entries[self.cursor] = next;
        self.replace_count += 1;
        Ok(())
    }
}
