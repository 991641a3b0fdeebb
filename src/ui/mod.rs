pub mod alert;
pub mod chat_view;
pub mod main_window;
pub mod scheduler_view;
pub mod setup;
pub mod style;
