//! Message panel state: the rendered history, the input line, and the
//! transitions driven by loading and sending.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, NaiveTime};

use crate::api::models::{Message, OutgoingMessage};
use crate::error::ApiError;
use crate::session::Session;
use crate::strings::Strings;

/// How often the open chat re-reads the history.
pub const DEFAULT_REFRESH_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn css_class(self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub sender_id: String,
    pub text: String,
    pub direction: Direction,
    /// Server time of the message; unknown for a message appended after a send
    /// until the next reload.
    pub time: Option<NaiveTime>,
}

impl MessageRow {
    pub fn css_classes(&self) -> [&'static str; 2] {
        ["message", self.direction.css_class()]
    }

    /// `"<sender> (HH:MM)"`, or just the sender when the time is unknown.
    pub fn heading(&self, strings: &Strings) -> String {
        let sender = match self.direction {
            Direction::Sent => strings.you.as_str(),
            Direction::Received => self.sender_id.as_str(),
        };
        match self.time {
            Some(t) => format!("{sender} ({})", t.format("%H:%M")),
            None => sender.to_string(),
        }
    }
}

/// Time of day of a server timestamp. Accepts RFC 3339 and naive ISO forms
/// with either a `T` or a space separator.
pub fn message_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.time());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
        .map(|dt| dt.time())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed,
}

#[derive(Debug, Clone)]
pub struct MessagePanel {
    session: Session,
    rows: Vec<MessageRow>,
    pub input: String,
}

impl MessagePanel {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            rows: Vec::new(),
            input: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rows(&self) -> &[MessageRow] {
        &self.rows
    }

    pub fn direction_of(&self, message: &Message) -> Direction {
        if message.sender_id == self.session.user_id {
            Direction::Sent
        } else {
            Direction::Received
        }
    }

    fn row(&self, message: Message) -> MessageRow {
        let time = message.timestamp.as_deref().and_then(|raw| {
            let time = message_time(raw);
            if time.is_none() {
                log::debug!("unreadable message timestamp {raw:?}");
            }
            time
        });
        MessageRow {
            direction: self.direction_of(&message),
            sender_id: message.sender_id,
            text: message.content,
            time,
        }
    }

    /// Replaces the rows with the history in server order. Returns whether
    /// the rows changed, so a periodic reload of the same history renders
    /// nothing. On error the current rows stay as they are.
    pub fn apply_history(&mut self, result: Result<Vec<Message>, ApiError>) -> bool {
        match result {
            Ok(messages) => {
                let rows: Vec<MessageRow> = messages.into_iter().map(|m| self.row(m)).collect();
                if rows == self.rows {
                    return false;
                }
                log::debug!("loaded {} messages", rows.len());
                self.rows = rows;
                true
            }
            Err(e) => {
                log::error!("Error loading messages: {e}");
                false
            }
        }
    }

    /// The message to post for the current input, or `None` when the input is
    /// blank. The input itself is left alone until the send completes.
    pub fn outgoing(&self) -> Option<OutgoingMessage> {
        let content = self.input.trim();
        if content.is_empty() {
            return None;
        }
        Some(OutgoingMessage {
            sender_id: self.session.user_id.clone(),
            receiver_id: self.session.receiver_id.clone(),
            content: content.to_string(),
        })
    }

    /// Appends the sent text and clears the input on success. On failure the
    /// input is kept for a retry.
    pub fn apply_send(
        &mut self,
        message: OutgoingMessage,
        result: Result<(), ApiError>,
    ) -> SendOutcome {
        match result {
            Ok(()) => {
                log::info!("message sent to {}", message.receiver_id);
                self.rows.push(MessageRow {
                    sender_id: message.sender_id,
                    text: message.content,
                    direction: Direction::Sent,
                    time: None,
                });
                self.input.clear();
                SendOutcome::Sent
            }
            Err(e) => {
                log::error!("Error sending message: {e}");
                SendOutcome::Failed
            }
        }
    }
}

/// Reload period for the chat page; `secs == 0` turns reloading off.
pub fn refresh_interval(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
