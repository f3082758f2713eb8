//! Ordered header multimap.
//!
//! [`HeaderMultimap`] is the header capability the signer works against. Names
//! keep their original casing and are stored in insertion order; each name maps
//! to a non-empty list of values. Lookups used by the signing rules are
//! case-insensitive, while canonical ordering is by lowercased name.

/// An insertion-ordered mapping from header name to one or more values.
///
/// # Examples
///
/// ```
/// use aksk_auth::HeaderMultimap;
///
/// let mut headers = HeaderMultimap::new();
/// headers.append("X-Trace", "a");
/// headers.append("X-Trace", "b");
/// headers.append("accept", "*/*");
///
/// assert_eq!(headers.first_value_ignore_case("x-trace"), Some("a"));
/// assert_eq!(headers.sorted_names(), vec!["accept", "X-Trace"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMultimap {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderMultimap {
    /// Create an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a value under `name`. Values are appended to an existing entry only
    /// when the name matches exactly.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Set `name` to a single value, replacing every case variant of the name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set_all(name.into(), vec![value.into()]);
    }

    /// Replace every case variant of `name` with the given values.
    pub(crate) fn set_all(&mut self, name: String, values: Vec<String>) {
        debug_assert!(!values.is_empty(), "header {name} must carry a value");
        self.remove_ignore_case(&name);
        self.entries.push((name, values));
    }

    /// Values stored under exactly `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Values stored under the first name equal to `name` ignoring case.
    #[must_use]
    pub fn get_ignore_case(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, values)| values.as_slice())
    }

    /// The first value stored under `name`, ignoring case.
    #[must_use]
    pub fn first_value_ignore_case(&self, name: &str) -> Option<&str> {
        self.get_ignore_case(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether any case variant of `name` is present.
    #[must_use]
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        self.get_ignore_case(name).is_some()
    }

    /// Remove every case variant of `name`, returning the values of the first
    /// variant removed.
    pub fn remove_ignore_case(&mut self, name: &str) -> Option<Vec<String>> {
        let mut removed = None;
        let mut kept = Vec::with_capacity(self.entries.len());
        for (existing, values) in self.entries.drain(..) {
            if existing.eq_ignore_ascii_case(name) {
                removed.get_or_insert(values);
            } else {
                kept.push((existing, values));
            }
        }
        self.entries = kept;
        removed
    }

    /// Iterate over `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Header names in canonical order: ascending by ASCII-lowercased name, ties
    /// broken by the original bytes so the order is total. Case folding matches
    /// the `*_ignore_case` lookups.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|(name, _)| name.as_str()).collect();
        names.sort_by_cached_key(|name| (name.to_ascii_lowercase(), *name));
        names
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for HeaderMultimap {
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderMultimap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        headers.extend(iter);
        headers
    }
}
