use super::{parse_display_name, Installation, Version};
use std::collections::{HashMap, VecDeque};

/// Stable identity of a card, taken from the source record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Installation(String),
    Version(String),
}

/// A source record normalized for display
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub key: EntryKey,
    pub label: String,
    pub detail: Option<String>,
    pub installed: bool,
}

impl From<&Installation> for CatalogEntry {
    fn from(installation: &Installation) -> Self {
        Self {
            key: EntryKey::Installation(installation.id.clone()),
            label: installation.label().to_string(),
            detail: installation.version.clone(),
            installed: true,
        }
    }
}

impl From<&Version> for CatalogEntry {
    fn from(version: &Version) -> Self {
        Self {
            key: EntryKey::Version(version.id.clone()),
            label: parse_display_name(version),
            detail: None,
            installed: version.is_installed,
        }
    }
}

/// Realized cards of one region, in source order.
///
/// `sync` is driven by the source revision. Cards whose key survives a
/// re-order or re-filter keep their entry; only new keys are adapted.
/// Records sharing a key are matched to existing cards in order of
/// appearance, so each keeps a card of its own.
#[derive(Debug, Default)]
pub struct CardArena {
    cards: Vec<CatalogEntry>,
    revision: Option<u64>,
    created: usize,
}

impl CardArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the arena in line with `records`. Returns the number of cards
    /// created by this call.
    pub fn sync<'a, R>(&mut self, revision: u64, records: impl IntoIterator<Item = &'a R>) -> usize
    where
        R: 'a,
        CatalogEntry: From<&'a R>,
    {
        if self.revision == Some(revision) {
            return 0;
        }

        let before = self.created;
        let mut pool: HashMap<EntryKey, VecDeque<CatalogEntry>> = HashMap::new();
        for card in self.cards.drain(..) {
            pool.entry(card.key.clone()).or_default().push_back(card);
        }

        let mut cards = Vec::new();
        for record in records {
            let entry = CatalogEntry::from(record);
            let reused = pool.get_mut(&entry.key).and_then(VecDeque::pop_front);
            let card = match reused {
                Some(mut existing) => {
                    // Same identity: refresh the projection in place
                    existing.label = entry.label;
                    existing.detail = entry.detail;
                    existing.installed = entry.installed;
                    existing
                }
                None => {
                    self.created += 1;
                    entry
                }
            };
            cards.push(card);
        }

        let dropped: usize = pool.values().map(VecDeque::len).sum();
        self.cards = cards;
        self.revision = Some(revision);

        let created = self.created - before;
        tracing::trace!(created, dropped, total = self.cards.len(), "Card arena synced");
        created
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.cards.get(index)
    }

    /// Cards in source order for `range`, clamped to the arena length
    pub fn slice(&self, range: std::ops::Range<usize>) -> impl Iterator<Item = (usize, &CatalogEntry)> {
        let end = range.end.min(self.cards.len());
        let start = range.start.min(end);
        self.cards[start..end]
            .iter()
            .enumerate()
            .map(move |(offset, card)| (start + offset, card))
    }

    #[cfg(test)]
    pub fn created_total(&self) -> usize {
        self.created
    }
}
