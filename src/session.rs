use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::scheduler::model::MeetingCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Evacuee,
    Soldier,
    Psychologist,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Evacuee, UserType::Soldier, UserType::Psychologist];

    /// Meeting categories offered on this user type's options page.
    pub fn meeting_categories(self) -> &'static [MeetingCategory] {
        match self {
            UserType::Soldier => &[MeetingCategory::Soldiers, MeetingCategory::Psychologist],
            UserType::Evacuee => &[MeetingCategory::Psychologist, MeetingCategory::Evacuee],
            UserType::Psychologist => &[MeetingCategory::Soldiers, MeetingCategory::Evacuee],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Evacuee => "evacuee",
            UserType::Soldier => "soldier",
            UserType::Psychologist => "psychologist",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is looking at the window and who they are talking to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub receiver_id: String,
    pub user_type: UserType,
}

/// The location the client was opened at. Meeting fetches are scoped by its
/// `user_id` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    url: Url,
}

impl PageContext {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(location: &str) -> Result<Self, url::ParseError> {
        Url::parse(location).map(Self::new)
    }

    /// `{base_url}/options/{user_type}?user_id={user_id}`
    pub fn for_session(base_url: &str, session: &Session) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(base_url.trim())?;
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["options", session.user_type.as_str()]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("user_id", &session.user_id);
        Ok(Self::new(url))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Blank values count as absent.
    pub fn user_id(&self) -> Option<String> {
        self.query("user_id").filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            user_id: "42".into(),
            receiver_id: "7".into(),
            user_type: UserType::Soldier,
        }
    }

    #[test]
    fn user_id_comes_from_the_query() {
        let page = PageContext::parse("http://host/options/soldier?foo=1&user_id=15").unwrap();
        assert_eq!(page.user_id().as_deref(), Some("15"));

        let page = PageContext::parse("http://host/options/soldier?user_id=").unwrap();
        assert_eq!(page.user_id(), None);

        let page = PageContext::parse("http://host/options/soldier").unwrap();
        assert_eq!(page.user_id(), None);
    }

    #[test]
    fn derived_location_points_at_the_options_page() {
        let page = PageContext::for_session("http://localhost:8000/", &session()).unwrap();
        assert_eq!(
            page.url().as_str(),
            "http://localhost:8000/options/soldier?user_id=42"
        );
        assert_eq!(page.user_id().as_deref(), Some("42"));
    }

    #[test]
    fn every_page_offers_two_categories() {
        for t in UserType::ALL {
            assert_eq!(t.meeting_categories().len(), 2, "{t}");
        }
    }
}
