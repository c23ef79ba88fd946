//! Filtered views over a loaded list. Everything here is pure: the same items
//! and criteria always produce the same subsequence.

use std::str::FromStr;

use shared::{domain::CampaignStatus, records::Campaign};

use crate::load_state::LoadState;

pub trait Listable {
    type Status: PartialEq;

    fn title(&self) -> &str;
    fn status(&self) -> &Self::Status;
}

impl Listable for Campaign {
    type Status = CampaignStatus;

    fn title(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &CampaignStatus {
        &self.status
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter<S> {
    All,
    Only(S),
}

impl<S> Default for StatusFilter<S> {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl FromStr for StatusFilter<CampaignStatus> {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        CampaignStatus::parse(value)
            .map(StatusFilter::Only)
            .ok_or_else(|| format!("unknown campaign status '{value}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria<S> {
    pub search_text: String,
    pub status: StatusFilter<S>,
}

impl<S> Default for FilterCriteria<S> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status: StatusFilter::All,
        }
    }
}

impl<S: PartialEq> FilterCriteria<S> {
    pub fn new(search_text: impl Into<String>, status: StatusFilter<S>) -> Self {
        Self {
            search_text: search_text.into(),
            status,
        }
    }

    /// Whether the user narrowed the list at all.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || self.status != StatusFilter::All
    }
}

pub fn derive_view<'a, T: Listable>(
    items: &'a [T],
    criteria: &FilterCriteria<T::Status>,
) -> Vec<&'a T> {
    let needle = criteria.search_text.to_lowercase();
    items
        .iter()
        .filter(|item| item.title().to_lowercase().contains(&needle))
        .filter(|item| match &criteria.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => item.status() == status,
        })
        .collect()
}

/// `derive_view` over a page state; anything but `Ready` yields nothing.
pub fn derive_view_from_state<'a, T: Listable>(
    state: &'a LoadState<Vec<T>>,
    criteria: &FilterCriteria<T::Status>,
) -> Vec<&'a T> {
    match state.payload() {
        Some(items) => derive_view(items, criteria),
        None => Vec::new(),
    }
}

pub fn empty_state_hint<S: PartialEq>(criteria: &FilterCriteria<S>) -> &'static str {
    if criteria.is_active() {
        "Try adjusting your search or filter criteria."
    } else {
        "Get started by creating your first campaign."
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
