use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use listing_alerts::config::AppConfig;
use listing_alerts::workflows::listing::Listing;
use listing_alerts::workflows::matching::{ProfileId, SearchProfile};
use listing_alerts::workflows::notify::{DispatchError, NotificationDispatcher, WhatsAppDispatcher};
use listing_alerts::workflows::profiles::{
    JsonProfileSource, ProfileSource, ProfileSourceError, StaticProfileSource,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stand-in used when no messaging credentials are configured: matches are logged and kept in
/// memory instead of being sent.
#[derive(Default, Clone)]
pub(crate) struct LogOnlyDispatcher {
    deliveries: Arc<Mutex<Vec<ProfileId>>>,
}

#[async_trait]
impl NotificationDispatcher for LogOnlyDispatcher {
    async fn dispatch(
        &self,
        profile: &SearchProfile,
        listing: &Listing,
    ) -> Result<(), DispatchError> {
        let logged = {
            let mut guard = self.deliveries.lock().unwrap_or_else(PoisonError::into_inner);
            guard.push(profile.id.clone());
            guard.len()
        };
        info!(
            profile = %profile.id,
            listing = listing.id.as_deref().unwrap_or("unknown"),
            address = %listing.address_line(),
            logged,
            "messaging not configured; listing notification logged only"
        );
        Ok(())
    }
}

impl LogOnlyDispatcher {
    #[cfg(test)]
    pub(crate) fn deliveries(&self) -> Vec<ProfileId> {
        self.deliveries
            .lock()
            .expect("delivery mutex poisoned")
            .clone()
    }
}

pub(crate) enum ConfiguredDispatcher {
    WhatsApp(WhatsAppDispatcher),
    LogOnly(LogOnlyDispatcher),
}

impl ConfiguredDispatcher {
    pub(crate) fn from_config(config: &AppConfig) -> Self {
        match WhatsAppDispatcher::from_config(&config.whatsapp) {
            Some(dispatcher) => {
                info!(url = dispatcher.messages_url(), "whatsapp delivery enabled");
                Self::WhatsApp(dispatcher)
            }
            None => {
                warn!("WHATSAPP_PHONE_NUMBER_ID or WHATSAPP_ACCESS_TOKEN missing; notifications are logged only");
                Self::LogOnly(LogOnlyDispatcher::default())
            }
        }
    }
}

#[async_trait]
impl NotificationDispatcher for ConfiguredDispatcher {
    async fn dispatch(
        &self,
        profile: &SearchProfile,
        listing: &Listing,
    ) -> Result<(), DispatchError> {
        match self {
            Self::WhatsApp(dispatcher) => dispatcher.dispatch(profile, listing).await,
            Self::LogOnly(dispatcher) => dispatcher.dispatch(profile, listing).await,
        }
    }
}

pub(crate) enum ConfiguredProfiles {
    File(JsonProfileSource),
    Empty(StaticProfileSource),
}

impl ConfiguredProfiles {
    pub(crate) fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => {
                let source = JsonProfileSource::new(path);
                info!(path = %source.path().display(), "search profiles read from file");
                Self::File(source)
            }
            None => {
                warn!("PROFILES_PATH not set; no search profiles will be matched");
                Self::Empty(StaticProfileSource::default())
            }
        }
    }
}

#[async_trait]
impl ProfileSource for ConfiguredProfiles {
    async fn profiles(&self) -> Result<Vec<SearchProfile>, ProfileSourceError> {
        match self {
            Self::File(source) => source.profiles().await,
            Self::Empty(source) => source.profiles().await,
        }
    }
}
