//! History capability and URL helpers.
//!
//! # Invariants
//! - `push` adds exactly one entry; `replace` never changes the entry count.
//! - Rewriting one query parameter preserves every other parameter and the
//!   fragment.

use log::info;
use url::Url;

/// Query parameter carrying the deep-linked record id.
pub const CHARACTER_PARAM: &str = "character";

/// Browser-like navigation capability.
pub trait Navigator {
    fn current_url(&self) -> Url;
    /// Adds a new history entry.
    fn push(&mut self, url: Url);
    /// Rewrites the current entry in place.
    fn replace(&mut self, url: Url);
    /// Leaves the page for `destination`.
    fn redirect(&mut self, destination: &str);
}

/// First value of query parameter `key`, if present.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Copy of `url` with `key` set to `value`, or removed when `value` is `None`.
pub fn with_query_param(url: &Url, key: &str, value: Option<&str>) -> Url {
    let kept = url
        .query_pairs()
        .filter(|(name, _)| name != key)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect::<Vec<_>>();

    let mut next = url.clone();
    if kept.is_empty() && value.is_none() {
        next.set_query(None);
        return next;
    }

    {
        let mut pairs = next.query_pairs_mut();
        pairs.clear();
        for (name, existing) in &kept {
            pairs.append_pair(name, existing);
        }
        if let Some(value) = value {
            pairs.append_pair(key, value);
        }
    }
    next
}

/// Fragment route of `url`; an absent or empty fragment is `/`.
pub fn route_of(url: &Url) -> String {
    match url.fragment() {
        Some(fragment) if !fragment.is_empty() => fragment.to_string(),
        _ => "/".to_string(),
    }
}

/// In-memory history stack with back/forward support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryNavigator {
    entries: Vec<Url>,
    index: usize,
    redirects: Vec<String>,
}

impl MemoryNavigator {
    pub fn new(initial: Url) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            redirects: Vec::new(),
        }
    }

    pub fn parse(initial: &str) -> Result<Self, url::ParseError> {
        Url::parse(initial).map(Self::new)
    }

    /// Number of entries in the stack, including forward entries.
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    /// Destinations passed to [`Navigator::redirect`], oldest first.
    pub fn redirects(&self) -> &[String] {
        &self.redirects
    }

    /// Steps back one entry. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Steps forward one entry. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Changes only the fragment, adding an entry like an anchor click does.
    pub fn set_fragment(&mut self, fragment: &str) {
        let mut next = self.current_url();
        next.set_fragment(Some(fragment));
        self.push(next);
    }
}

impl Navigator for MemoryNavigator {
    fn current_url(&self) -> Url {
        self.entries[self.index].clone()
    }

    fn push(&mut self, url: Url) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    fn replace(&mut self, url: Url) {
        self.entries[self.index] = url;
    }

    fn redirect(&mut self, destination: &str) {
        info!("event=route_redirect module=nav status=ok destination={destination}");
        self.redirects.push(destination.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{query_param, route_of, with_query_param, MemoryNavigator, Navigator};
    use url::Url;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("valid url")
    }

    #[test]
    fn sets_and_strips_character_param_preserving_the_rest() {
        let base = url("https://pantheon.test/index.html?lang=en#/characters");

        let opened = with_query_param(&base, "character", Some("zeus-01"));
        assert_eq!(query_param(&opened, "character").as_deref(), Some("zeus-01"));
        assert_eq!(query_param(&opened, "lang").as_deref(), Some("en"));
        assert_eq!(opened.fragment(), Some("/characters"));

        let closed = with_query_param(&opened, "character", None);
        assert_eq!(query_param(&closed, "character"), None);
        assert_eq!(closed.as_str(), "https://pantheon.test/index.html?lang=en#/characters");
    }

    #[test]
    fn stripping_the_only_param_drops_the_query() {
        let opened = url("https://pantheon.test/?character=nonexistent-99");
        let closed = with_query_param(&opened, "character", None);
        assert_eq!(closed.query(), None);
        assert_eq!(closed.as_str(), "https://pantheon.test/");
    }

    #[test]
    fn route_defaults_to_root() {
        assert_eq!(route_of(&url("https://pantheon.test/")), "/");
        assert_eq!(route_of(&url("https://pantheon.test/#/about")), "/about");
    }

    #[test]
    fn push_truncates_forward_entries_and_replace_keeps_count() {
        let mut nav = MemoryNavigator::parse("https://pantheon.test/").expect("nav");
        nav.push(url("https://pantheon.test/?character=a"));
        nav.push(url("https://pantheon.test/?character=b"));
        assert_eq!(nav.history_len(), 3);

        assert!(nav.back());
        nav.replace(url("https://pantheon.test/?character=c"));
        assert_eq!(nav.history_len(), 3);
        assert!(nav.forward());
        assert!(!nav.forward());

        assert!(nav.back());
        nav.push(url("https://pantheon.test/?character=d"));
        assert_eq!(nav.history_len(), 3);
        assert_eq!(
            query_param(&nav.current_url(), "character").as_deref(),
            Some("d")
        );
    }

    #[test]
    fn set_fragment_pushes_and_redirect_is_recorded() {
        let mut nav = MemoryNavigator::parse("https://pantheon.test/").expect("nav");
        nav.set_fragment("/about");
        assert_eq!(nav.history_len(), 2);
        assert_eq!(nav.current_url().fragment(), Some("/about"));

        nav.redirect("404.html");
        assert_eq!(nav.redirects(), ["404.html".to_string()]);
    }
}
