use serde::{Deserialize, Serialize};

use crate::scheduler::model::{MeetingCategory, MeetingStatus, Role};
use crate::session::UserType;

/// Every user-facing string. Defaults are Hebrew; any entry can be replaced
/// from the `[strings]` table of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Strings {
    pub right_to_left: bool,

    pub app_title: String,
    pub chat_page: String,
    pub meetings_page: String,
    pub message_placeholder: String,
    pub send: String,
    pub send_failed: String,
    /// Sender heading of the viewing user's own messages.
    pub you: String,

    pub fill_all_fields: String,
    pub invalid_date: String,
    pub invalid_time: String,
    pub psychologist_hours: String,
    pub choose_role: String,
    pub slot_taken: String,
    pub meeting_scheduled: String,

    pub loading: String,
    pub no_meetings: String,
    /// Heading of a card whose category is unknown (fetched from the server).
    pub meeting_card_title: String,
    /// Heading of a card with a category; `{category}` is replaced.
    pub meeting_with: String,
    pub date_label: String,
    pub time_label: String,
    pub status_label: String,
    pub role_label: String,
    pub date_placeholder: String,

    pub schedule: String,
    pub close: String,
    pub ok: String,

    pub category_soldiers: String,
    pub category_psychologist: String,
    pub category_evacuee: String,

    pub role_commander: String,
    pub role_medic: String,
    pub role_engineer: String,
    pub role_infantry: String,

    pub status_planned: String,
    pub status_completed: String,
    pub status_cancelled: String,

    pub setup_title: String,
    pub setup_server: String,
    pub setup_user_id: String,
    pub setup_receiver_id: String,
    pub user_type_evacuee: String,
    pub user_type_soldier: String,
    pub user_type_psychologist: String,
    pub setup_connect: String,
    pub setup_connecting: String,
    pub setup_unreachable: String,
    pub settings: String,
    pub setup_incomplete: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            right_to_left: true,

            app_title: "מרחב תמיכה".into(),
            chat_page: "צ'אט".into(),
            meetings_page: "פגישות".into(),
            message_placeholder: "הקלד הודעה…".into(),
            send: "שלח".into(),
            send_failed: "שגיאה בשליחת ההודעה. אנא נסה שוב.".into(),
            you: "אני".into(),

            fill_all_fields: "נא למלא את כל השדות".into(),
            invalid_date: "נא לבחור תאריך תקין".into(),
            invalid_time: "נא לבחור שעה מהרשימה".into(),
            psychologist_hours: "פגישות עם פסיכולוג זמינות רק בין השעות 10:00 ל-20:00".into(),
            choose_role: "נא לבחור תפקיד".into(),
            slot_taken: "יש כבר פגישה מתוכננת בזמן זה. נא לבחור זמן אחר.".into(),
            meeting_scheduled: "הפגישה נקבעה בהצלחה!".into(),

            loading: "טוען…".into(),
            no_meetings: "עדיין לא נקבעו פגישות".into(),
            meeting_card_title: "נקבעה פגישה".into(),
            meeting_with: "פגישה עם {category}".into(),
            date_label: "תאריך".into(),
            time_label: "שעה".into(),
            status_label: "סטטוס".into(),
            role_label: "תפקיד".into(),
            date_placeholder: "YYYY-MM-DD".into(),

            schedule: "קבע פגישה".into(),
            close: "סגור".into(),
            ok: "אישור".into(),

            category_soldiers: "חיילים".into(),
            category_psychologist: "פסיכולוג".into(),
            category_evacuee: "מפון אחר".into(),

            role_commander: "מפקד".into(),
            role_medic: "חובש".into(),
            role_engineer: "מהנדס".into(),
            role_infantry: "לוחם".into(),

            status_planned: "מתוכנן".into(),
            status_completed: "הושלם".into(),
            status_cancelled: "בוטל".into(),

            setup_title: "התחברות לשרת".into(),
            setup_server: "כתובת השרת".into(),
            setup_user_id: "מזהה משתמש".into(),
            setup_receiver_id: "מזהה נמען".into(),
            user_type_evacuee: "מפונה".into(),
            user_type_soldier: "חייל".into(),
            user_type_psychologist: "פסיכולוג".into(),
            setup_connect: "התחבר".into(),
            setup_connecting: "מתחבר…".into(),
            setup_unreachable: "השרת אינו זמין כרגע, ההגדרות נשמרו".into(),
            settings: "הגדרות".into(),
            setup_incomplete: "נא למלא כתובת שרת ומזהה משתמש".into(),
        }
    }
}

impl Strings {
    pub fn category(&self, category: MeetingCategory) -> &str {
        match category {
            MeetingCategory::Soldiers => &self.category_soldiers,
            MeetingCategory::Psychologist => &self.category_psychologist,
            MeetingCategory::Evacuee => &self.category_evacuee,
        }
    }

    pub fn role(&self, role: Role) -> &str {
        match role {
            Role::Commander => &self.role_commander,
            Role::Medic => &self.role_medic,
            Role::Engineer => &self.role_engineer,
            Role::Infantry => &self.role_infantry,
        }
    }

    pub fn user_type(&self, user_type: UserType) -> &str {
        match user_type {
            UserType::Evacuee => &self.user_type_evacuee,
            UserType::Soldier => &self.user_type_soldier,
            UserType::Psychologist => &self.user_type_psychologist,
        }
    }

    pub fn status<'a>(&'a self, status: &'a MeetingStatus) -> &'a str {
        match status {
            MeetingStatus::Planned => &self.status_planned,
            MeetingStatus::Completed => &self.status_completed,
            MeetingStatus::Cancelled => &self.status_cancelled,
            MeetingStatus::Other(raw) => raw,
        }
    }

    pub fn card_title(&self, category: Option<MeetingCategory>) -> String {
        match category {
            Some(c) => self.meeting_with.replace("{category}", self.category(c)),
            None => self.meeting_card_title.clone(),
        }
    }

    /// `"<label>: <value>"`, the line format of a meeting card.
    pub fn labeled(label: &str, value: &str) -> String {
        format!("{label}: {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let text = r#"
            right_to_left = false
            slot_taken = "That time is already booked."
        "#;
        let strings: Strings = toml::from_str(text).unwrap();
        assert!(!strings.right_to_left);
        assert_eq!(strings.slot_taken, "That time is already booked.");
        assert_eq!(strings.fill_all_fields, Strings::default().fill_all_fields);
    }

    #[test]
    fn card_title_names_the_category() {
        let mut strings = Strings::default();
        strings.meeting_with = "Meeting with {category}".into();
        strings.category_psychologist = "a psychologist".into();
        assert_eq!(
            strings.card_title(Some(MeetingCategory::Psychologist)),
            "Meeting with a psychologist"
        );
        assert_eq!(strings.card_title(None), strings.meeting_card_title);
    }

    #[test]
    fn unknown_status_is_shown_verbatim() {
        let strings = Strings::default();
        let status = MeetingStatus::Other("rescheduled".into());
        assert_eq!(strings.status(&status), "rescheduled");
        assert_eq!(strings.status(&MeetingStatus::Planned), strings.status_planned);
    }

    #[test]
    fn every_user_type_has_a_label() {
        let strings = Strings::default();
        let labels: Vec<&str> = UserType::ALL.iter().map(|t| strings.user_type(*t)).collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.iter().all(|l| !l.is_empty() && l.chars().all(|c| !c.is_ascii())));
    }
}
