//! Event category enumeration.

use serde::{Deserialize, Serialize};

/// Kind of club activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Match,
    Meeting,
    Education,
    ClubEvent,
    WorkDay,
    YouthEvent,
    Practice,
    Class,
    RangeUnavailable,
}

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        EventCategory::Match,
        EventCategory::Meeting,
        EventCategory::Education,
        EventCategory::ClubEvent,
        EventCategory::WorkDay,
        EventCategory::YouthEvent,
        EventCategory::Practice,
        EventCategory::Class,
        EventCategory::RangeUnavailable,
    ];

    /// Categories prospects are allowed to see before acceptance.
    pub fn is_open_to_prospects(&self) -> bool {
        match self {
            EventCategory::Education | EventCategory::ClubEvent => true,
            EventCategory::Match
            | EventCategory::Meeting
            | EventCategory::WorkDay
            | EventCategory::YouthEvent
            | EventCategory::Practice
            | EventCategory::Class
            | EventCategory::RangeUnavailable => false,
        }
    }

    /// Stable string form used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Match => "match",
            EventCategory::Meeting => "meeting",
            EventCategory::Education => "education",
            EventCategory::ClubEvent => "club_event",
            EventCategory::WorkDay => "work_day",
            EventCategory::YouthEvent => "youth_event",
            EventCategory::Practice => "practice",
            EventCategory::Class => "class",
            EventCategory::RangeUnavailable => "range_unavailable",
        }
    }

    /// Parses the storage form. Hyphenated spellings are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}
