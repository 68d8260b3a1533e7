//! Search, multi-select filters and pagination for list views

use chrono::NaiveDate;
use rewards_admin_core::{
    BonusDay, Challenge, ChallengeStatus, ChallengeType, Game, Integration, Offer, PauseRule,
    Task, XpMultiplier,
};
use std::collections::HashSet;
use std::hash::Hash;

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Records that can be matched against a free-text search box
pub trait Searchable {
    /// Text fields the search box looks at
    fn search_haystack(&self) -> Vec<String>;

    /// Case-insensitive substring match on any field; a blank query matches everything
    fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self
                .search_haystack()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Challenge {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.title.clone(), self.challenge_type.label().to_string()]
    }
}

impl Searchable for XpMultiplier {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.streak_length.to_string(), self.notes.clone()]
    }
}

impl Searchable for BonusDay {
    fn search_haystack(&self) -> Vec<String> {
        vec![format!("day {}", self.bonus_day), self.rewards.to_string()]
    }
}

impl Searchable for PauseRule {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.rule_name.clone(), self.action_on_miss.label().to_string()]
    }
}

impl Searchable for Game {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.name.clone(), self.sdk_provider.clone(), self.category.clone()]
    }
}

impl Searchable for Offer {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.title.clone(), self.description.clone(), self.sdk_provider.clone()]
    }
}

impl Searchable for Task {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.title.clone(), self.description.clone()]
    }
}

impl Searchable for Integration {
    fn search_haystack(&self) -> Vec<String> {
        vec![self.provider.clone(), self.display_name.clone()]
    }
}

/// A multi-select filter: empty selection means "all"
#[derive(Debug, Clone)]
pub struct MultiSelect<T: Eq + Hash> {
    selected: HashSet<T>,
}

impl<T: Eq + Hash> Default for MultiSelect<T> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash> MultiSelect<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            selected: values.into_iter().collect(),
        }
    }

    /// Select if unselected, unselect if selected
    pub fn toggle(&mut self, value: T) {
        if !self.selected.remove(&value) {
            self.selected.insert(value);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn allows(&self, value: &T) -> bool {
        self.selected.is_empty() || self.selected.contains(value)
    }
}

/// Filters for the challenge list and calendar
#[derive(Debug, Clone, Default)]
pub struct ChallengeFilter {
    pub search: String,
    pub types: MultiSelect<ChallengeType>,
    /// Matched against the derived status, not the stored one
    pub statuses: MultiSelect<ChallengeStatus>,
    pub visible_only: bool,
}

impl ChallengeFilter {
    pub fn matches(&self, challenge: &Challenge, today: NaiveDate) -> bool {
        challenge.matches_search(&self.search)
            && self.types.allows(&challenge.challenge_type)
            && self.statuses.allows(&challenge.display_status(today))
            && (!self.visible_only || challenge.visibility)
    }

    /// Matching challenges, in input order
    pub fn apply<'a>(&self, challenges: &'a [Challenge], today: NaiveDate) -> Vec<&'a Challenge> {
        challenges
            .iter()
            .filter(|c| self.matches(c, today))
            .collect()
    }
}

/// One page of a filtered list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually shown
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index of the first item on this page (0 when empty)
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    /// "Showing 11-20 of 42"
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return format!("Showing 0 of {}", self.total_items);
        }
        format!(
            "Showing {}-{} of {}",
            self.first_index(),
            self.first_index() + self.items.len() - 1,
            self.total_items
        )
    }
}

/// Slice `items` into a page. The requested page is clamped into range, and an
/// empty list still has one (empty) page.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Search then paginate any searchable list
pub fn search_page<'a, T: Searchable>(
    records: &'a [T],
    query: &str,
    page: usize,
    page_size: usize,
) -> Page<&'a T> {
    let matching: Vec<&T> = records.iter().filter(|r| r.matches_search(query)).collect();
    paginate(matching, page, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::ClaimType;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn challenge(title: &str, kind: ChallengeType, date: NaiveDate, visible: bool) -> Challenge {
        Challenge {
            id: title.to_lowercase(),
            title: title.to_string(),
            challenge_type: kind,
            date,
            coin_reward: 0,
            xp_reward: 0,
            claim_type: ClaimType::Auto,
            visibility: visible,
            status: ChallengeStatus::Pending,
        }
    }

    #[test]
    fn test_paginate_clamps_page() {
        let page = paginate((1..=42).collect::<Vec<_>>(), 9, 10);
        assert_eq!(page.page, 5);
        assert_eq!(page.items, vec![41, 42]);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.summary(), "Showing 41-42 of 42");
        assert!(!page.has_next());
        assert!(page.has_previous());

        let first = paginate((1..=42).collect::<Vec<_>>(), 0, 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 10);
    }

    #[test]
    fn test_empty_list_has_one_empty_page() {
        let page = paginate(Vec::<u8>::new(), 3, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.summary(), "Showing 0 of 0");
    }

    #[test]
    fn test_challenge_filter_uses_derived_status() {
        let today = day(2025, 5, 10);
        let challenges = vec![
            challenge("Spin Friday", ChallengeType::Spin, day(2025, 5, 9), true),
            challenge("Spin Today", ChallengeType::Spin, today, true),
            challenge("Survey Later", ChallengeType::Survey, day(2025, 5, 20), false),
        ];

        let mut filter = ChallengeFilter::default();
        filter.statuses.toggle(ChallengeStatus::Expired);
        let hits = filter.apply(&challenges, today);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Spin Friday");

        // Every record is stored as Pending, but Pending is never derived
        let pending = ChallengeFilter {
            statuses: MultiSelect::new([ChallengeStatus::Pending]),
            ..Default::default()
        };
        assert!(pending.apply(&challenges, today).is_empty());
    }

    #[test]
    fn test_challenge_filter_search_type_and_visibility() {
        let today = day(2025, 5, 10);
        let challenges = vec![
            challenge("Spin Friday", ChallengeType::Spin, today, true),
            challenge("Survey Later", ChallengeType::Survey, today, false),
        ];

        let filter = ChallengeFilter {
            search: "  survey ".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&challenges, today).len(), 1);

        let filter = ChallengeFilter {
            types: MultiSelect::new([ChallengeType::Spin, ChallengeType::Survey]),
            visible_only: true,
            ..Default::default()
        };
        assert_eq!(filter.apply(&challenges, today).len(), 1);
    }

    #[test]
    fn test_multiselect_toggle() {
        let mut select = MultiSelect::default();
        assert!(select.allows(&1));
        select.toggle(1);
        assert!(!select.allows(&2));
        select.toggle(1);
        assert!(select.is_empty());
    }

    #[test]
    fn test_search_page() {
        let rules = vec![
            PauseRule {
                id: "1".into(),
                rule_name: "Weekend grace".into(),
                action_on_miss: Default::default(),
                grace_days: 2,
                impact_on_xp: Default::default(),
                reset_coins: false,
            },
            PauseRule {
                id: "2".into(),
                rule_name: "Hard reset".into(),
                action_on_miss: Default::default(),
                grace_days: 0,
                impact_on_xp: Default::default(),
                reset_coins: true,
            },
        ];
        let page = search_page(&rules, "GRACE", 1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, "1");
    }
}
