pub mod model;
pub mod selector;

use crate::api::models::MeetingRecord;
use crate::error::{ApiError, ScheduleError};
use crate::session::PageContext;
use crate::strings::Strings;
use model::{
    parse_date, parse_time, Meeting, MeetingCategory, MeetingStatus, Role, Slot, SLOT_FORMAT,
};
use selector::SelectorBoard;

/// One rendered meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingCard {
    pub title: String,
    pub date_line: String,
    pub time_line: String,
    pub status_line: String,
    pub role_line: Option<String>,
}

/// What the meetings container shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingsView {
    Loading(String),
    Placeholder(String),
    Cards(Vec<MeetingCard>),
}

/// Selector panels plus the list of known meetings. The list is the only
/// input to conflict checks; cards are derived from it.
#[derive(Debug, Clone)]
pub struct MeetingScheduler {
    board: SelectorBoard,
    meetings: Vec<Meeting>,
    loaded: bool,
}

impl MeetingScheduler {
    pub fn new(categories: &[MeetingCategory]) -> Self {
        Self {
            board: SelectorBoard::new(categories),
            meetings: Vec::new(),
            loaded: false,
        }
    }

    pub fn board(&self) -> &SelectorBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut SelectorBoard {
        &mut self.board
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Whether the first fetch has completed. The meetings page keeps
    /// scheduling off until then.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn show_selector(&mut self, category: MeetingCategory) -> bool {
        self.board.show(category)
    }

    pub fn hide_selector(&mut self, category: MeetingCategory) {
        self.board.hide(category)
    }

    pub fn select_role(&mut self, category: MeetingCategory, role: Role) -> bool {
        self.board.select_role(category, role)
    }

    pub fn has_conflict(&self, slot: Slot) -> bool {
        self.meetings.iter().any(|m| m.slot == slot)
    }

    /// Validates the category's panel, checks the slot against every known
    /// meeting, then records a planned meeting and closes the panel.
    pub fn schedule(&mut self, category: MeetingCategory) -> Result<&Meeting, ScheduleError> {
        let request = self
            .board
            .panel(category)
            .ok_or(ScheduleError::MissingFields)?
            .request()?;

        if self.has_conflict(request.slot) {
            log::info!(
                "slot {} {} already taken",
                request.slot.date,
                request.slot.time.format(SLOT_FORMAT)
            );
            return Err(ScheduleError::SlotTaken);
        }

        self.meetings.push(Meeting {
            slot: request.slot,
            category: Some(category),
            role: request.role,
            status: MeetingStatus::Planned,
        });
        self.loaded = true;
        self.board.hide(category);
        log::info!("scheduled {category} meeting");

        let index = self.meetings.len() - 1;
        Ok(&self.meetings[index])
    }

    /// Merges a backend result into the known meetings. Fetched meetings are
    /// replaced wholesale; meetings scheduled in this session are kept, and a
    /// fetched record on the same slot as one of them is dropped. Errors leave
    /// only the session's meetings, so a failed first fetch shows the
    /// placeholder.
    pub fn apply_fetched(&mut self, result: Result<Vec<MeetingRecord>, ApiError>) {
        self.loaded = true;
        self.meetings.retain(|m| m.category.is_some());
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error fetching meetings: {e}");
                return;
            }
        };
        log::debug!("fetched {} meetings", records.len());

        let local = std::mem::take(&mut self.meetings);
        let fetched = records.into_iter().filter_map(|r| {
            let date = parse_date(&r.meeting_date);
            let time = parse_time(&r.meeting_time);
            match (date, time) {
                (Some(date), Some(time)) => Some(Meeting {
                    slot: Slot::new(date, time),
                    category: None,
                    role: None,
                    status: MeetingStatus::parse(r.status.as_deref()),
                }),
                _ => {
                    log::warn!(
                        "skipping meeting with unreadable slot {:?} {:?}",
                        r.meeting_date,
                        r.meeting_time
                    );
                    None
                }
            }
        });
        for meeting in fetched {
            if local.iter().any(|m| m.slot == meeting.slot) {
                log::debug!("{} already scheduled here", meeting.slot.date);
                continue;
            }
            self.meetings.push(meeting);
        }
        self.meetings.extend(local);
    }

    /// The user whose meetings should be requested for `page`. Without a
    /// `user_id` no request is made and the empty result is applied here.
    pub fn begin_fetch(&mut self, page: &PageContext) -> Option<String> {
        match page.user_id() {
            Some(user_id) => {
                log::debug!("Fetching meetings for user ID: {user_id}");
                Some(user_id)
            }
            None => {
                log::warn!("no user_id in {}", page.url());
                self.apply_fetched(Ok(Vec::new()));
                None
            }
        }
    }

    pub fn card(meeting: &Meeting, strings: &Strings) -> MeetingCard {
        MeetingCard {
            title: strings.card_title(meeting.category),
            date_line: Strings::labeled(&strings.date_label, &meeting.slot.date.to_string()),
            time_line: Strings::labeled(
                &strings.time_label,
                &meeting.slot.time.format(SLOT_FORMAT).to_string(),
            ),
            status_line: Strings::labeled(&strings.status_label, strings.status(&meeting.status)),
            role_line: meeting
                .role
                .map(|r| Strings::labeled(&strings.role_label, strings.role(r))),
        }
    }

    pub fn view(&self, strings: &Strings) -> MeetingsView {
        if !self.loaded {
            return MeetingsView::Loading(strings.loading.clone());
        }
        if self.meetings.is_empty() {
            return MeetingsView::Placeholder(strings.no_meetings.clone());
        }
        MeetingsView::Cards(self.meetings.iter().map(|m| Self::card(m, strings)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, time: &str, status: Option<&str>) -> MeetingRecord {
        MeetingRecord {
            meeting_date: date.into(),
            meeting_time: time.into(),
            status: status.map(Into::into),
        }
    }

    fn fill(s: &mut MeetingScheduler, category: MeetingCategory, date: &str, time: &str) {
        s.show_selector(category);
        s.board_mut().set_date(category, date);
        s.board_mut().set_time(category, time);
    }

    fn card_count(s: &MeetingScheduler) -> usize {
        match s.view(&Strings::default()) {
            MeetingsView::Cards(cards) => cards.len(),
            _ => 0,
        }
    }

    #[test]
    fn same_slot_twice_is_rejected() {
        let psych = MeetingCategory::Psychologist;
        let mut s = MeetingScheduler::new(&[psych, MeetingCategory::Evacuee]);
        s.apply_fetched(Ok(vec![record("2024-05-01", "10:00", None)]));
        assert_eq!(card_count(&s), 1);

        fill(&mut s, psych, "2024-05-01", "10:00");
        assert_eq!(s.schedule(psych), Err(ScheduleError::SlotTaken));
        assert_eq!(card_count(&s), 1);
        assert_eq!(s.board().active(), Some(psych));

        s.board_mut().set_time(psych, "11:00");
        let meeting = s.schedule(psych).unwrap().clone();
        assert_eq!(meeting.status, MeetingStatus::Planned);
        assert_eq!(meeting.category, Some(psych));
        assert_eq!(card_count(&s), 2);
        assert_eq!(s.board().active(), None);
    }

    #[test]
    fn fetched_seconds_still_conflict() {
        let evacuee = MeetingCategory::Evacuee;
        let mut s = MeetingScheduler::new(&[evacuee]);
        s.apply_fetched(Ok(vec![record("2024-05-01", "10:00:00", Some("planned"))]));
        fill(&mut s, evacuee, "2024-05-01", "10:00");
        assert_eq!(s.schedule(evacuee), Err(ScheduleError::SlotTaken));
    }

    #[test]
    fn locally_scheduled_meetings_block_their_slot() {
        let evacuee = MeetingCategory::Evacuee;
        let mut s = MeetingScheduler::new(&[evacuee]);
        fill(&mut s, evacuee, "2024-06-02", "09:00");
        assert!(s.schedule(evacuee).is_ok());
        fill(&mut s, evacuee, "2024-06-02", "09:00");
        assert_eq!(s.schedule(evacuee), Err(ScheduleError::SlotTaken));
        assert_eq!(s.meetings().len(), 1);
    }

    #[test]
    fn every_validation_failure_leaves_no_card() {
        let soldiers = MeetingCategory::Soldiers;
        let psych = MeetingCategory::Psychologist;
        let mut s = MeetingScheduler::new(&[soldiers, psych]);
        s.apply_fetched(Ok(Vec::new()));

        fill(&mut s, psych, "", "10:00");
        assert_eq!(s.schedule(psych), Err(ScheduleError::MissingFields));

        fill(&mut s, psych, "2024-05-01", "");
        assert_eq!(s.schedule(psych), Err(ScheduleError::MissingFields));

        fill(&mut s, psych, "2024-05-01", "08:00");
        let err = s.schedule(psych).unwrap_err();
        assert_eq!(err.alert(&Strings::default()), Strings::default().psychologist_hours);

        fill(&mut s, soldiers, "2024-05-01", "08:00");
        assert_eq!(s.schedule(soldiers), Err(ScheduleError::RoleNotSelected));

        assert!(s.meetings().is_empty());
        assert_eq!(
            s.view(&Strings::default()),
            MeetingsView::Placeholder(Strings::default().no_meetings)
        );

        s.select_role(soldiers, Role::Commander);
        let meeting = s.schedule(soldiers).unwrap();
        assert_eq!(meeting.role, Some(Role::Commander));
    }

    #[test]
    fn panel_missing_from_page_cannot_schedule() {
        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        assert_eq!(
            s.schedule(MeetingCategory::Soldiers),
            Err(ScheduleError::MissingFields)
        );
    }

    #[test]
    fn view_before_and_after_fetch() {
        let strings = Strings::default();
        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        assert_eq!(s.view(&strings), MeetingsView::Loading(strings.loading.clone()));

        s.apply_fetched(Err(ApiError::Status(reqwest::StatusCode::NOT_FOUND)));
        assert_eq!(s.view(&strings), MeetingsView::Placeholder(strings.no_meetings.clone()));
    }

    #[test]
    fn fetch_error_drops_previous_cards() {
        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        s.apply_fetched(Ok(vec![record("2024-05-01", "10:00", None)]));
        s.apply_fetched(Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        assert!(matches!(s.view(&Strings::default()), MeetingsView::Placeholder(_)));
    }

    #[test]
    fn unreadable_records_are_skipped() {
        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        s.apply_fetched(Ok(vec![
            record("tomorrow", "10:00", None),
            record("2024-05-01", "noon", None),
            record("2024-05-02", "12:00", Some("completed")),
        ]));
        assert_eq!(s.meetings().len(), 1);
        assert_eq!(s.meetings()[0].status, MeetingStatus::Completed);
    }

    #[test]
    fn card_lines() {
        let strings = Strings::default();
        let mut s = MeetingScheduler::new(&[MeetingCategory::Soldiers]);
        s.apply_fetched(Ok(vec![record("2024-05-01", "10:00:00", None)]));
        let MeetingsView::Cards(cards) = s.view(&strings) else {
            panic!("expected cards");
        };
        let card = &cards[0];
        assert_eq!(card.title, strings.meeting_card_title);
        assert_eq!(card.date_line, format!("{}: 2024-05-01", strings.date_label));
        assert_eq!(card.time_line, format!("{}: 10:00", strings.time_label));
        assert_eq!(
            card.status_line,
            format!("{}: {}", strings.status_label, strings.status_planned)
        );
        assert_eq!(card.role_line, None);
    }

    #[test]
    fn meeting_booked_before_the_fetch_survives_it() {
        let evacuee = MeetingCategory::Evacuee;
        let mut s = MeetingScheduler::new(&[evacuee]);
        fill(&mut s, evacuee, "2024-05-01", "10:00");
        assert!(s.schedule(evacuee).is_ok());

        s.apply_fetched(Ok(vec![
            record("2024-05-01", "10:00", None),
            record("2024-05-02", "11:00", None),
        ]));
        let slots: Vec<_> = s
            .meetings()
            .iter()
            .map(|m| (m.slot.date.to_string(), m.category))
            .collect();
        assert_eq!(
            slots,
            [
                ("2024-05-02".to_string(), None),
                ("2024-05-01".to_string(), Some(evacuee)),
            ]
        );

        s.apply_fetched(Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        assert_eq!(s.meetings().len(), 1);
        assert_eq!(s.meetings()[0].category, Some(evacuee));
    }

    #[test]
    fn page_without_user_skips_the_request() {
        let strings = Strings::default();
        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        let page = PageContext::parse("http://localhost:8000/options/evacuee").unwrap();
        assert_eq!(s.begin_fetch(&page), None);
        assert!(s.is_loaded());
        assert_eq!(s.view(&strings), MeetingsView::Placeholder(strings.no_meetings.clone()));

        let mut s = MeetingScheduler::new(&[MeetingCategory::Evacuee]);
        let page = PageContext::parse("http://localhost:8000/options/evacuee?user_id=4").unwrap();
        assert_eq!(s.begin_fetch(&page).as_deref(), Some("4"));
        assert!(!s.is_loaded());
    }
}
