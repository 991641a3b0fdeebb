pub mod client;
pub mod models;

use std::future::Future;

use crate::error::ApiError;
use models::{MeetingRecord, Message, OutgoingMessage};

/// Message endpoints of the backend.
pub trait MessageApi {
    fn messages(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<Message>, ApiError>> + Send;

    fn send_message(
        &self,
        message: &OutgoingMessage,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Meeting endpoints of the backend.
pub trait MeetingApi {
    fn meetings(&self, user_id: &str)
        -> impl Future<Output = Result<Vec<MeetingRecord>, ApiError>> + Send;
}
