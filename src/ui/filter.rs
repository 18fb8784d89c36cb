use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use super::signal::{Memo, Signal};
use crate::catalog::{parse_display_name, Version};

/// How the search text is matched against a version's display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring
    #[default]
    Contains,
    /// Skim-style fuzzy match, order of the source list is kept
    Fuzzy,
}

impl MatchMode {
    fn id(self) -> u64 {
        match self {
            MatchMode::Contains => 0,
            MatchMode::Fuzzy => 1,
        }
    }
}

/// Indices of `versions` that are not installed and match `query`, in
/// source order. The query is used verbatim; only the empty string matches
/// everything.
pub fn filter_versions(versions: &[Version], query: &str, mode: MatchMode) -> Vec<usize> {
    let needle = query.to_lowercase();
    let matcher = match mode {
        MatchMode::Fuzzy if !query.is_empty() => Some(SkimMatcherV2::default().ignore_case()),
        _ => None,
    };

    versions
        .iter()
        .enumerate()
        .filter(|(_, version)| !version.is_installed)
        .filter(|(_, version)| {
            if needle.is_empty() {
                return true;
            }
            let name = parse_display_name(version);
            match &matcher {
                Some(matcher) => matcher.fuzzy_match(&name, query).is_some(),
                None => name.to_lowercase().contains(&needle),
            }
        })
        .map(|(i, _)| i)
        .collect()
}

/// Live search over the version list backing the grid
#[derive(Debug, Clone)]
pub struct VersionFilter {
    query: Signal<String>,
    mode: MatchMode,
    visible: Memo<Vec<usize>>,
}

impl VersionFilter {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            query: Signal::new(String::new()),
            mode,
            visible: Memo::new(),
        }
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns true if the query actually changed
    pub fn set_query(&mut self, text: impl Into<String>) -> bool {
        self.query.set(text.into())
    }

    pub fn push_char(&mut self, c: char) -> bool {
        self.query.update(|q| q.push(c))
    }

    pub fn pop_char(&mut self) -> bool {
        self.query.update(|q| {
            q.pop();
        })
    }

    pub fn clear(&mut self) -> bool {
        self.set_query(String::new())
    }

    /// Recompute the visible subset if the source or the query changed.
    /// Returns true when the subset was rebuilt.
    pub fn refresh(&mut self, source_revision: u64, versions: &[Version]) -> bool {
        let deps = [source_revision, self.query.revision(), self.mode.id()];
        let query = self.query.get().clone();
        let mode = self.mode;
        let rebuilt = self.visible.refresh(&deps, |visible| {
            *visible = filter_versions(versions, &query, mode);
        });
        if rebuilt {
            tracing::debug!(
                query = %query,
                visible = self.visible.get().len(),
                total = versions.len(),
                evaluations = self.visible.evaluations(),
                "Version filter recomputed"
            );
        }
        rebuilt
    }

    #[cfg(test)]
    pub fn visible_indices(&self) -> &[usize] {
        self.visible.get()
    }

    /// Number of versions passing the filter
    pub fn visible_count(&self) -> usize {
        self.visible.get().len()
    }

    /// The visible versions, resolved against the same source passed to
    /// [`VersionFilter::refresh`]
    pub fn visible_versions<'a>(&'a self, versions: &'a [Version]) -> impl Iterator<Item = &'a Version> + 'a {
        self.visible.get().iter().filter_map(move |&i| versions.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VersionKind;

    fn sample() -> Vec<Version> {
        vec![
            Version::new("1.20", true),
            Version::new("1.19", false),
            Version::new("1.18", false),
        ]
    }

    fn ids<'a>(filter: &'a VersionFilter, versions: &'a [Version]) -> Vec<&'a str> {
        filter.visible_versions(versions).map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn query_narrows_to_matching_uninstalled() {
        let versions = sample();
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.set_query("19");
        filter.refresh(1, &versions);
        assert_eq!(ids(&filter, &versions), vec!["1.19"]);
    }

    #[test]
    fn empty_query_only_drops_installed() {
        let versions = sample();
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.refresh(1, &versions);
        assert_eq!(ids(&filter, &versions), vec!["1.19", "1.18"]);
    }

    #[test]
    fn clearing_query_restores_baseline() {
        let versions = sample();
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.refresh(1, &versions);
        let baseline = filter.visible_indices().to_vec();

        filter.set_query("18");
        filter.refresh(1, &versions);
        assert_eq!(filter.visible_count(), 1);

        filter.set_query("");
        filter.refresh(1, &versions);
        assert_eq!(filter.visible_indices(), baseline.as_slice());
    }

    #[test]
    fn same_query_twice_is_idempotent() {
        let versions = sample();
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.set_query("1.1");
        assert!(filter.refresh(1, &versions));
        let once = filter.visible_indices().to_vec();

        assert!(!filter.set_query("1.1"));
        assert!(!filter.refresh(1, &versions));
        assert_eq!(filter.visible_indices(), once.as_slice());
    }

    #[test]
    fn matching_ignores_case() {
        let mut versions = sample();
        versions.push(Version {
            id: "24w10a".into(),
            is_installed: false,
            kind: VersionKind::Snapshot,
        });
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.set_query("SNAP");
        filter.refresh(1, &versions);
        assert_eq!(ids(&filter, &versions), vec!["24w10a"]);
    }

    #[test]
    fn results_are_ordered_uninstalled_subsequences() {
        let versions: Vec<Version> = (0..40)
            .map(|i| Version::new(format!("1.{}.{}", i % 7, i), i % 3 == 0))
            .collect();

        for query in ["", "1", "1.2", "3", ".1", "zzz", "1.6.34"] {
            for mode in [MatchMode::Contains, MatchMode::Fuzzy] {
                let indices = filter_versions(&versions, query, mode);
                assert!(indices.windows(2).all(|w| w[0] < w[1]), "{query:?} {mode:?}");
                assert!(indices.iter().all(|&i| !versions[i].is_installed));
            }
        }
    }

    #[test]
    fn whitespace_query_is_matched_verbatim() {
        let versions = vec![
            Version::new("1.19", false),
            Version {
                id: "24w10a".into(),
                is_installed: false,
                kind: VersionKind::Snapshot,
            },
        ];
        assert_eq!(filter_versions(&versions, " ", MatchMode::Contains), vec![1]);
        assert_eq!(filter_versions(&versions, " 1", MatchMode::Contains), Vec::<usize>::new());
        assert_eq!(filter_versions(&versions, "", MatchMode::Contains), vec![0, 1]);

        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.set_query(" ");
        filter.refresh(1, &versions);
        assert_eq!(ids(&filter, &versions), vec!["24w10a"]);
    }

    #[test]
    fn fuzzy_mode_matches_scattered_characters() {
        let versions = vec![Version::new("1.19.2", false), Version::new("1.8.9", false)];
        assert_eq!(filter_versions(&versions, "192", MatchMode::Fuzzy), vec![0]);
        assert!(filter_versions(&versions, "192", MatchMode::Contains).is_empty());
    }

    #[test]
    fn source_revision_triggers_recompute() {
        let mut versions = sample();
        let mut filter = VersionFilter::new(MatchMode::Contains);
        filter.refresh(1, &versions);
        versions[0].is_installed = false;
        assert!(!filter.refresh(1, &versions));
        assert!(filter.refresh(2, &versions));
        assert_eq!(filter.visible_count(), 3);
    }

    #[test]
    fn editing_keystrokes() {
        let mut filter = VersionFilter::new(MatchMode::Contains);
        assert!(filter.push_char('1'));
        assert!(filter.push_char('9'));
        assert_eq!(filter.query(), "19");
        assert!(filter.pop_char());
        assert!(filter.clear());
        assert!(!filter.pop_char());
    }
}
