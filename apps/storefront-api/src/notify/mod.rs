//! Notification channel: the in-process [`EventBus`] and the websocket
//! endpoint that streams it to clients.

mod bus;
pub mod ws;

pub use bus::EventBus;
