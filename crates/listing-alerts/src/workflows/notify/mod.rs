//! Outbound buyer notifications. The intake service only decides who qualifies; dispatchers own
//! the delivery format and transport.

mod whatsapp;

pub use whatsapp::{normalize_recipient, template_message, WhatsAppDispatcher};

use async_trait::async_trait;

use crate::workflows::listing::Listing;
use crate::workflows::matching::SearchProfile;

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, profile: &SearchProfile, listing: &Listing)
        -> Result<(), DispatchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("contact handle '{0}' is not a usable phone number")]
    InvalidRecipient(String),
    #[error("messaging provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("messaging transport unavailable: {0}")]
    Transport(String),
}
