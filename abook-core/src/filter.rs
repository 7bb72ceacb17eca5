use std::collections::BTreeSet;

use crate::fields::{Status, Tag};
use crate::person::Person;

/// Criteria deciding which persons are shown.
///
/// Each criterion is optional; an empty criterion does not restrict the list.
/// When name keywords are given, any one of them must match a whole word of the
/// name (ignoring case).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub keywords: Vec<String>,
    pub statuses: BTreeSet<Status>,
    pub tags: BTreeSet<Tag>,
}

impl PersonFilter {
    /// A filter that shows everybody
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.keywords.is_empty() && self.statuses.is_empty() && self.tags.is_empty()
    }

    pub fn matches(&self, person: &Person) -> bool {
        let name_ok = self.keywords.is_empty()
            || self.keywords.iter().any(|keyword| {
                person
                    .name()
                    .as_str()
                    .split_whitespace()
                    .any(|word| word.eq_ignore_ascii_case(keyword))
            });

        let status_ok = self.statuses.is_empty()
            || person
                .status()
                .is_some_and(|status| self.statuses.contains(&status));

        let tags_ok = self.tags.is_empty() || person.tags().iter().any(|t| self.tags.contains(t));

        name_ok && status_ok && tags_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::test_support::PersonBuilder;

    #[test]
    fn test_keywords_match_whole_words_ignoring_case() {
        let person = PersonBuilder::new().name("Alice Pauline").build();
        let filter = PersonFilter {
            keywords: vec!["alice".into()],
            ..Default::default()
        };
        assert!(filter.matches(&person));

        let partial = PersonFilter {
            keywords: vec!["Ali".into()],
            ..Default::default()
        };
        assert!(!partial.matches(&person));
    }

    #[test]
    fn test_status_and_tag_criteria() {
        let pending = PersonBuilder::new().tags(&["urgent"]).build();
        let no_status = PersonBuilder::new().status(None).build();

        let by_status = PersonFilter {
            statuses: [Status::Pending].into_iter().collect(),
            ..Default::default()
        };
        assert!(by_status.matches(&pending));
        assert!(!by_status.matches(&no_status));

        let by_tag = PersonFilter {
            tags: ["urgent".parse().unwrap()].into_iter().collect(),
            ..Default::default()
        };
        assert!(by_tag.matches(&pending));
        assert!(!by_tag.matches(&no_status));
    }

    #[test]
    fn test_unrestricted_filter_matches_everyone() {
        let filter = PersonFilter::all();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(&PersonBuilder::new().build()));
    }
}
