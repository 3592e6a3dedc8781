use crate::model::ShortcutRecord;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

pub struct FuzzyMatcher {
    matcher: Matcher,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }

    /// Best-scoring shortcut for `query` by name. Ties go to the earlier tile.
    pub fn best_match<'a>(&mut self, query: &str, records: &'a [ShortcutRecord]) -> Option<&'a ShortcutRecord> {
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
        let mut buf = Vec::new();
        let mut best: Option<(u32, &ShortcutRecord)> = None;

        for record in records {
            let haystack = Utf32Str::new(&record.name, &mut buf);
            if let Some(score) = pattern.score(haystack, &mut self.matcher) {
                if best.is_none_or(|(top, _)| score > top) {
                    best = Some((score, record));
                }
            }
        }

        best.map(|(_, record)| record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShortcutDraft;

    fn named(id: u32, name: &str) -> ShortcutRecord {
        ShortcutRecord::from_draft(
            id,
            ShortcutDraft {
                name: name.to_string(),
                command: name.to_lowercase(),
                ..ShortcutDraft::default()
            },
        )
    }

    #[test]
    fn picks_closest_name() {
        let records = vec![named(1, "Text Editor"), named(2, "File Manager"), named(3, "Firefox")];
        let mut matcher = FuzzyMatcher::new();
        assert_eq!(matcher.best_match("file", &records).map(|r| r.id), Some(2));
        assert_eq!(matcher.best_match("ffox", &records).map(|r| r.id), Some(3));
        assert!(matcher.best_match("zzz", &records).is_none());
    }
}
