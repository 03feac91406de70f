use serde::Deserialize;

use crate::data::embedded;
use crate::error::DataError;

const PAGES_FILE: &str = "onboarding.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OnboardingPage {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

pub fn pages() -> Result<Vec<OnboardingPage>, DataError> {
    embedded(PAGES_FILE)
}

/// What pressing "Next" led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved,
    Finished,
}

/// Pager over the introduction pages shown on first launch.
#[derive(Debug, Clone)]
pub struct Onboarding {
    pages: Vec<OnboardingPage>,
    current: usize,
}

impl Onboarding {
    pub fn new(pages: Vec<OnboardingPage>) -> Self {
        Self { pages, current: 0 }
    }

    pub fn load() -> Result<Self, DataError> {
        Ok(Self::new(pages()?))
    }

    pub fn pages(&self) -> &[OnboardingPage] {
        &self.pages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&OnboardingPage> {
        self.pages.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.pages.len()
    }

    pub fn next(&mut self) -> Advance {
        if self.is_last() {
            Advance::Finished
        } else {
            self.current += 1;
            Advance::Moved
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Jump past the remaining pages.
    pub fn skip(&mut self) -> Advance {
        self.current = self.pages.len().saturating_sub(1);
        Advance::Finished
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_last() {
            "Get Started"
        } else {
            "Next"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_pages_load() {
        let pages = pages().unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].title, "Welcome to Breathe");
        assert_eq!(pages[2].title, "Find Your Calm");
        assert!(pages.iter().all(|p| !p.icon.is_empty()));
    }

    #[test]
    fn next_walks_to_get_started() {
        let mut pager = Onboarding::load().unwrap();
        assert_eq!(pager.button_label(), "Next");
        assert_eq!(pager.next(), Advance::Moved);
        assert_eq!(pager.next(), Advance::Moved);
        assert!(pager.is_last());
        assert_eq!(pager.button_label(), "Get Started");
        assert_eq!(pager.next(), Advance::Finished);
        assert_eq!(pager.current_index(), 2);
    }

    #[test]
    fn previous_stops_at_first_page() {
        let mut pager = Onboarding::load().unwrap();
        pager.previous();
        assert_eq!(pager.current_index(), 0);
        pager.next();
        pager.previous();
        assert_eq!(pager.current().unwrap().id, "1");
    }

    #[test]
    fn skip_lands_on_last_page() {
        let mut pager = Onboarding::load().unwrap();
        assert_eq!(pager.skip(), Advance::Finished);
        assert!(pager.is_last());
    }

    #[test]
    fn empty_pager_finishes_immediately() {
        let mut pager = Onboarding::new(Vec::new());
        assert!(pager.current().is_none());
        assert_eq!(pager.next(), Advance::Finished);
    }
}
