use crate::error::ScheduleError;
use crate::scheduler::model::{parse_date, parse_time, MeetingCategory, Role, Slot};

/// Single-choice role group of a selector panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePicker {
    pub active: bool,
    selected: Option<Role>,
}

impl RolePicker {
    pub fn selected(&self) -> Option<Role> {
        self.selected
    }

    pub fn is_selected(&self, role: Role) -> bool {
        self.selected == Some(role)
    }
}

/// Date/time/role inputs for one meeting category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorPanel {
    pub category: MeetingCategory,
    pub active: bool,
    pub date: String,
    pub time: String,
    pub roles: Option<RolePicker>,
}

/// A validated selection, not yet checked for conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeetingRequest {
    pub category: MeetingCategory,
    pub slot: Slot,
    pub role: Option<Role>,
}

impl SelectorPanel {
    fn new(category: MeetingCategory) -> Self {
        Self {
            category,
            active: false,
            date: String::new(),
            time: String::new(),
            roles: category.requires_role().then(RolePicker::default),
        }
    }

    fn deactivate(&mut self) {
        self.active = false;
        if let Some(roles) = self.roles.as_mut() {
            roles.active = false;
        }
    }

    /// Checks, in order: both fields present, the time is one of the
    /// category's slots, the date parses, a role is picked when required.
    pub fn request(&self) -> Result<MeetingRequest, ScheduleError> {
        let date = self.date.trim();
        let time = self.time.trim();
        if date.is_empty() || time.is_empty() {
            return Err(ScheduleError::MissingFields);
        }

        let time = parse_time(time)
            .filter(|t| self.category.offers(*t))
            .ok_or_else(|| ScheduleError::InvalidTime {
                category: self.category,
                time: time.to_string(),
            })?;
        let date = parse_date(date).ok_or_else(|| ScheduleError::InvalidDate(date.to_string()))?;

        let role = match &self.roles {
            Some(picker) => Some(picker.selected.ok_or(ScheduleError::RoleNotSelected)?),
            None => None,
        };

        Ok(MeetingRequest {
            category: self.category,
            slot: Slot::new(date, time),
            role,
        })
    }
}

/// The set of selector panels on one page. At most one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorBoard {
    panels: Vec<SelectorPanel>,
}

impl SelectorBoard {
    pub fn new(categories: &[MeetingCategory]) -> Self {
        let mut panels: Vec<SelectorPanel> = Vec::with_capacity(categories.len());
        for &c in categories {
            if !panels.iter().any(|p| p.category == c) {
                panels.push(SelectorPanel::new(c));
            }
        }
        Self { panels }
    }

    pub fn panels(&self) -> &[SelectorPanel] {
        &self.panels
    }

    pub fn panel(&self, category: MeetingCategory) -> Option<&SelectorPanel> {
        self.panels.iter().find(|p| p.category == category)
    }

    pub fn panel_mut(&mut self, category: MeetingCategory) -> Option<&mut SelectorPanel> {
        self.panels.iter_mut().find(|p| p.category == category)
    }

    pub fn active(&self) -> Option<MeetingCategory> {
        self.panels.iter().find(|p| p.active).map(|p| p.category)
    }

    /// Deactivates every panel and role group, then activates `category`
    /// together with its role group. Returns false when the page has no
    /// panel for `category`, in which case nothing changes.
    pub fn show(&mut self, category: MeetingCategory) -> bool {
        if self.panel(category).is_none() {
            log::warn!("no selector panel for {category}");
            return false;
        }
        self.panels.iter_mut().for_each(SelectorPanel::deactivate);
        if let Some(panel) = self.panel_mut(category) {
            panel.active = true;
            if let Some(roles) = panel.roles.as_mut() {
                roles.active = true;
            }
        }
        true
    }

    pub fn hide(&mut self, category: MeetingCategory) {
        if let Some(panel) = self.panel_mut(category) {
            panel.deactivate();
        }
    }

    /// Radio semantics within the category's role group.
    pub fn select_role(&mut self, category: MeetingCategory, role: Role) -> bool {
        match self.panel_mut(category).and_then(|p| p.roles.as_mut()) {
            Some(picker) => {
                picker.selected = Some(role);
                true
            }
            None => false,
        }
    }

    pub fn set_date(&mut self, category: MeetingCategory, date: impl Into<String>) {
        if let Some(panel) = self.panel_mut(category) {
            panel.date = date.into();
        }
    }

    pub fn set_time(&mut self, category: MeetingCategory, time: impl Into<String>) {
        if let Some(panel) = self.panel_mut(category) {
            panel.time = time.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SelectorBoard {
        SelectorBoard::new(&[MeetingCategory::Soldiers, MeetingCategory::Psychologist])
    }

    fn active_flags(board: &SelectorBoard) -> Vec<(MeetingCategory, bool, Option<bool>)> {
        board
            .panels()
            .iter()
            .map(|p| (p.category, p.active, p.roles.as_ref().map(|r| r.active)))
            .collect()
    }

    #[test]
    fn starts_with_nothing_active() {
        let board = board();
        assert_eq!(board.active(), None);
        assert!(board.panels().iter().all(|p| !p.active));
    }

    #[test]
    fn switching_panels_leaves_only_the_last_active() {
        let mut board = board();
        assert!(board.show(MeetingCategory::Soldiers));
        assert_eq!(
            active_flags(&board),
            vec![
                (MeetingCategory::Soldiers, true, Some(true)),
                (MeetingCategory::Psychologist, false, None),
            ]
        );

        assert!(board.show(MeetingCategory::Psychologist));
        assert_eq!(
            active_flags(&board),
            vec![
                (MeetingCategory::Soldiers, false, Some(false)),
                (MeetingCategory::Psychologist, true, None),
            ]
        );
        assert_eq!(board.active(), Some(MeetingCategory::Psychologist));
    }

    #[test]
    fn showing_an_absent_category_changes_nothing() {
        let mut board = board();
        board.show(MeetingCategory::Soldiers);
        let before = board.clone();
        assert!(!board.show(MeetingCategory::Evacuee));
        assert_eq!(board, before);
    }

    #[test]
    fn role_selection_is_single_choice() {
        let mut board = board();
        assert!(board.select_role(MeetingCategory::Soldiers, Role::Medic));
        assert!(board.select_role(MeetingCategory::Soldiers, Role::Engineer));
        let picker = board
            .panel(MeetingCategory::Soldiers)
            .and_then(|p| p.roles.clone())
            .unwrap();
        assert_eq!(picker.selected(), Some(Role::Engineer));
        assert!(!picker.is_selected(Role::Medic));
        assert!(!board.select_role(MeetingCategory::Psychologist, Role::Medic));
    }

    #[test]
    fn hide_drops_the_role_group_too() {
        let mut board = board();
        board.show(MeetingCategory::Soldiers);
        board.hide(MeetingCategory::Soldiers);
        assert_eq!(
            active_flags(&board)[0],
            (MeetingCategory::Soldiers, false, Some(false))
        );
    }

    #[test]
    fn request_validation_order() {
        let mut board = board();
        let soldiers = MeetingCategory::Soldiers;
        let request = |b: &SelectorBoard| b.panel(soldiers).unwrap().request();

        assert_eq!(request(&board), Err(ScheduleError::MissingFields));

        board.set_date(soldiers, "2024-05-01");
        assert_eq!(request(&board), Err(ScheduleError::MissingFields));

        board.set_time(soldiers, "23:00");
        assert!(matches!(request(&board), Err(ScheduleError::InvalidTime { .. })));

        board.set_time(soldiers, "10:00");
        assert_eq!(request(&board), Err(ScheduleError::RoleNotSelected));

        board.set_date(soldiers, "2024-02-30");
        assert_eq!(
            request(&board),
            Err(ScheduleError::InvalidDate("2024-02-30".into()))
        );

        board.set_date(soldiers, "2024-05-01");
        board.select_role(soldiers, Role::Infantry);
        let ok = request(&board).unwrap();
        assert_eq!(ok.role, Some(Role::Infantry));
        assert_eq!(ok.slot.date.to_string(), "2024-05-01");
    }
}
