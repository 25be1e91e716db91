use std::collections::BTreeSet;

/// Identity-keyed set of currently chosen rows, held apart from the record
/// list so it survives a wholesale list replacement on refresh. Keys are
/// business identities (`job_url`, `job_id`), never list positions.
///
/// Keys that vanish from the refreshed list stay in the set but become
/// inert; they are not auto-pruned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    keys: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.keys.remove(key) {
            self.keys.insert(key.to_owned());
        }
    }

    /// Select-all against the current candidate rows: clears when the
    /// selection already equals the candidate set exactly, otherwise
    /// replaces the selection with exactly the candidates. A replacement,
    /// not a union: select-all under a filter discards prior selection.
    pub fn toggle_all<I>(&mut self, candidates: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let candidates: BTreeSet<String> = candidates.into_iter().map(Into::into).collect();
        if self.keys == candidates {
            self.keys.clear();
        } else {
            self.keys = candidates;
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.keys.iter().cloned().collect()
    }
}
