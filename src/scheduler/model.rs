use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub const SLOT_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingCategory {
    Soldiers,
    Psychologist,
    Evacuee,
}

impl MeetingCategory {
    pub const ALL: [MeetingCategory; 3] = [
        MeetingCategory::Soldiers,
        MeetingCategory::Psychologist,
        MeetingCategory::Evacuee,
    ];

    pub fn requires_role(self) -> bool {
        matches!(self, MeetingCategory::Soldiers)
    }

    /// First and last bookable hour, inclusive.
    fn hours(self) -> (u32, u32) {
        match self {
            MeetingCategory::Psychologist => (10, 19),
            MeetingCategory::Soldiers | MeetingCategory::Evacuee => (8, 20),
        }
    }

    /// The enumerated slot list offered for this category.
    pub fn slots(self) -> Vec<NaiveTime> {
        let (first, last) = self.hours();
        (first..=last)
            .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
            .collect()
    }

    pub fn slot_labels(self) -> Vec<String> {
        self.slots()
            .iter()
            .map(|t| t.format(SLOT_FORMAT).to_string())
            .collect()
    }

    pub fn offers(self, time: NaiveTime) -> bool {
        self.slots().contains(&time)
    }
}

impl fmt::Display for MeetingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MeetingCategory::Soldiers => "soldiers",
            MeetingCategory::Psychologist => "psychologist",
            MeetingCategory::Evacuee => "evacuee",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Commander,
    Medic,
    Engineer,
    Infantry,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Commander, Role::Medic, Role::Engineer, Role::Infantry];
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeetingStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
    Other(String),
}

impl MeetingStatus {
    /// Missing or blank status means planned.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => MeetingStatus::Planned,
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "planned" | "scheduled" => MeetingStatus::Planned,
                "completed" | "done" => MeetingStatus::Completed,
                "cancelled" | "canceled" => MeetingStatus::Cancelled,
                _ => MeetingStatus::Other(s.to_string()),
            },
        }
    }
}

/// A `(date, time)` pair a meeting occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub slot: Slot,
    /// Unknown for meetings fetched from the backend.
    pub category: Option<MeetingCategory>,
    pub role: Option<Role>,
    pub status: MeetingStatus,
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, SLOT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psychologist_hours_end_before_eight_pm() {
        let labels = MeetingCategory::Psychologist.slot_labels();
        assert_eq!(labels.first().map(String::as_str), Some("10:00"));
        assert_eq!(labels.last().map(String::as_str), Some("19:00"));
        assert!(!MeetingCategory::Psychologist.offers(parse_time("09:00").unwrap()));
        assert!(MeetingCategory::Soldiers.offers(parse_time("09:00").unwrap()));
    }

    #[test]
    fn only_soldiers_need_a_role() {
        let needing: Vec<_> = MeetingCategory::ALL
            .into_iter()
            .filter(|c| c.requires_role())
            .collect();
        assert_eq!(needing, vec![MeetingCategory::Soldiers]);
    }

    #[test]
    fn time_parsing_accepts_seconds() {
        assert_eq!(parse_time("10:00"), parse_time("10:00:00"));
        assert_eq!(parse_time("ten"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn status_defaults_to_planned() {
        assert_eq!(MeetingStatus::parse(None), MeetingStatus::Planned);
        assert_eq!(MeetingStatus::parse(Some("  ")), MeetingStatus::Planned);
        assert_eq!(MeetingStatus::parse(Some("Canceled")), MeetingStatus::Cancelled);
        assert_eq!(
            MeetingStatus::parse(Some("on hold")),
            MeetingStatus::Other("on hold".into())
        );
    }
}
