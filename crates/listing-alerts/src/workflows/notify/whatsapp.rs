use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::{DispatchError, NotificationDispatcher};
use crate::config::WhatsAppConfig;
use crate::workflows::listing::Listing;
use crate::workflows::matching::SearchProfile;

const DUTCH_COUNTRY_CODE: &str = "31";

/// Sends the listing as a WhatsApp Cloud API template message.
#[derive(Debug, Clone)]
pub struct WhatsAppDispatcher {
    client: Client,
    messages_url: String,
    access_token: String,
    template_name: String,
    template_language: String,
}

impl WhatsAppDispatcher {
    /// `None` when the phone number id or access token is not configured.
    pub fn from_config(config: &WhatsAppConfig) -> Option<Self> {
        let (phone_number_id, access_token) = config.credentials()?;
        let messages_url = format!(
            "{}/{}/{}/messages",
            config.graph_api_base.trim_end_matches('/'),
            config.api_version,
            phone_number_id
        );

        Some(Self {
            client: Client::new(),
            messages_url,
            access_token: access_token.to_string(),
            template_name: config.template_name.clone(),
            template_language: config.template_language.clone(),
        })
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }
}

#[async_trait]
impl NotificationDispatcher for WhatsAppDispatcher {
    async fn dispatch(
        &self,
        profile: &SearchProfile,
        listing: &Listing,
    ) -> Result<(), DispatchError> {
        let recipient = normalize_recipient(&profile.contact_handle)
            .ok_or_else(|| DispatchError::InvalidRecipient(profile.contact_handle.clone()))?;
        let payload = template_message(
            &recipient,
            &self.template_name,
            &self.template_language,
            listing,
        );

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|err| DispatchError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(profile = %profile.id, %recipient, "whatsapp listing message sent");
        Ok(())
    }
}

/// International form of a stored phone number. Numbers written with `+` or `00` already carry a
/// country code; a national number has its trunk `0` replaced by `31`.
pub fn normalize_recipient(contact: &str) -> Option<String> {
    let contact = contact.trim();
    let digits: String = contact.chars().filter(char::is_ascii_digit).collect();

    let international = if contact.starts_with('+') {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else if let Some(rest) = digits.strip_prefix('0') {
        if rest.is_empty() {
            return None;
        }
        format!("{DUTCH_COUNTRY_CODE}{rest}")
    } else if digits.starts_with(DUTCH_COUNTRY_CODE) {
        digits
    } else if digits.is_empty() {
        return None;
    } else {
        format!("{DUTCH_COUNTRY_CODE}{digits}")
    };

    (!international.is_empty()).then_some(international)
}

/// Template payload announcing `listing`; parameter order matches the approved template body.
pub fn template_message(recipient: &str, template: &str, language: &str, listing: &Listing) -> Value {
    let parameters: Vec<Value> = [
        listing.city.clone().unwrap_or_default(),
        listing.address_line(),
        listing.room_count.to_string(),
        listing.property_type.clone(),
        listing.living_area.to_string(),
        listing.outdoor_space.label().to_string(),
        listing
            .energy_label
            .map(|label| label.to_string())
            .unwrap_or_default(),
    ]
    .into_iter()
    .map(|text| json!({ "type": "text", "text": text }))
    .collect();

    json!({
        "messaging_product": "whatsapp",
        "to": recipient,
        "type": "template",
        "template": {
            "name": template,
            "language": { "code": language },
            "components": [
                { "type": "body", "parameters": parameters }
            ]
        }
    })
}
