//! Application State

use std::sync::Arc;

use billing_core::PaymentStore;

use crate::config::ServerConfig;
use crate::form::CardFormPage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment store, created once at startup
    pub store: Arc<dyn PaymentStore>,

    /// Card form renderer
    pub card_form: Arc<CardFormPage>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, store: Arc<dyn PaymentStore>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            store,
            card_form: Arc::new(CardFormPage::new()?),
            config: Arc::new(config),
        })
    }
}
