use thiserror::Error;

use crate::scheduler::model::MeetingCategory;
use crate::strings::Strings;

/// Failures talking to the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Local validation failures of a meeting request. None of these touch the
/// network and all of them abort before any state changes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("date or time missing")]
    MissingFields,
    #[error("date {0:?} is not a calendar date")]
    InvalidDate(String),
    #[error("time {time:?} is not offered for {category}")]
    InvalidTime {
        category: MeetingCategory,
        time: String,
    },
    #[error("no role selected")]
    RoleNotSelected,
    #[error("slot already taken")]
    SlotTaken,
}

impl ScheduleError {
    /// The localized alert shown to the user.
    pub fn alert<'a>(&self, strings: &'a Strings) -> &'a str {
        match self {
            ScheduleError::MissingFields => &strings.fill_all_fields,
            ScheduleError::InvalidDate(_) => &strings.invalid_date,
            ScheduleError::InvalidTime {
                category: MeetingCategory::Psychologist,
                ..
            } => &strings.psychologist_hours,
            ScheduleError::InvalidTime { .. } => &strings.invalid_time,
            ScheduleError::RoleNotSelected => &strings.choose_role,
            ScheduleError::SlotTaken => &strings.slot_taken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_time_wording_depends_on_category() {
        let strings = Strings::default();
        let psych = ScheduleError::InvalidTime {
            category: MeetingCategory::Psychologist,
            time: "08:00".into(),
        };
        let other = ScheduleError::InvalidTime {
            category: MeetingCategory::Evacuee,
            time: "07:00".into(),
        };
        assert_eq!(psych.alert(&strings), strings.psychologist_hours);
        assert_eq!(other.alert(&strings), strings.invalid_time);
        assert_ne!(psych.alert(&strings), other.alert(&strings));
    }
}
