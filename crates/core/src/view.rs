//! Read-only projection of the feedback collection for display.
//!
//! [`project`] filters and orders a borrowed snapshot of the collection. It
//! never mutates or reorders the collection itself.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::feedback::{FeedbackRecord, FeedbackType, Priority};

/// Value of the "all" option in the type and priority dropdowns.
pub const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Type dropdown: everything, or one exact type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(FeedbackType),
}

impl TypeFilter {
    pub fn matches(&self, feedback_type: &FeedbackType) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == feedback_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = CoreError;

    /// Dropdown values come from the stored data, so any label is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(FILTER_ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(FeedbackType::from_label(s)))
        }
    }
}

/// Priority dropdown: everything, or one priority compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, priority: &Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted.as_str().eq_ignore_ascii_case(priority.as_str()),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(FILTER_ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(Priority::from_label(s)))
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Message,
    Priority,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "message" => Ok(Self::Message),
            "priority" => Ok(Self::Priority),
            _ => Err(CoreError::Validation(format!(
                "Invalid sort key '{s}'. Must be one of: title, message, priority"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Desc,
        }
    }

    fn compare(&self, a: &FeedbackRecord, b: &FeedbackRecord) -> Ordering {
        let ordering = match self.key {
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Message => a.message.to_lowercase().cmp(&b.message.to_lowercase()),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Column-header sort state: unsorted until a header is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState(Option<SortSpec>);

impl SortState {
    pub fn spec(&self) -> Option<SortSpec> {
        self.0
    }

    /// Header click. The active column flips direction; another column
    /// becomes active in ascending order.
    pub fn toggle(&mut self, key: SortKey) {
        self.0 = Some(match self.0 {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::asc(key),
        });
    }
}

// ---------------------------------------------------------------------------
// Query + projection
// ---------------------------------------------------------------------------

/// Everything the table controls contribute to the visible rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub show_archived: bool,
    pub type_filter: TypeFilter,
    pub priority_filter: PriorityFilter,
    pub sort: Option<SortSpec>,
}

impl ViewQuery {
    /// Conjunction of the archived, search, type, and priority filters.
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        record.archived == self.show_archived
            && self.matches_search(record)
            && self.type_filter.matches(&record.feedback_type)
            && self.priority_filter.matches(&record.priority)
    }

    fn matches_search(&self, record: &FeedbackRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.title.to_lowercase().contains(&needle)
            || record.message.to_lowercase().contains(&needle)
            || record.priority.as_str().to_lowercase().contains(&needle)
    }
}

/// Filter then sort `items` for display.
///
/// The sort is stable, so ties keep collection order. Without a sort spec
/// the filtered rows keep collection order.
pub fn project<'a>(items: &'a [FeedbackRecord], query: &ViewQuery) -> Vec<&'a FeedbackRecord> {
    let mut rows: Vec<&FeedbackRecord> = items.iter().filter(|r| query.matches(r)).collect();
    if let Some(spec) = query.sort {
        rows.sort_by(|a, b| spec.compare(a, b));
    }
    rows
}

/// Distinct types present in `items`, first-seen order.
pub fn type_options(items: &[FeedbackRecord]) -> Vec<FeedbackType> {
    let mut seen = Vec::new();
    for record in items {
        if !seen.contains(&record.feedback_type) {
            seen.push(record.feedback_type.clone());
        }
    }
    seen
}

/// Distinct lowercase priority labels present in `items`, first-seen order.
pub fn priority_options(items: &[FeedbackRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in items {
        let label = record.priority.as_str().to_lowercase();
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
