//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use seniorsync_core::ports::{
    AlertService, CompanionChatService, FactCheckService, MedicationStore, NewsService,
    PlacesService, ScamAnalysisService, SpeechToTextService, WeatherService,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers.
///
/// Each upstream adapter is present only when its credential was configured;
/// a `None` is the not-configured case and the handler decides whether that
/// degrades to a fallback payload or an explicit error.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub medications: Arc<dyn MedicationStore>,
    pub chat: Option<Arc<dyn CompanionChatService>>,
    pub scam: Option<Arc<dyn ScamAnalysisService>>,
    pub fact_check: Option<Arc<dyn FactCheckService>>,
    pub weather: Option<Arc<dyn WeatherService>>,
    pub places: Option<Arc<dyn PlacesService>>,
    pub news: Option<Arc<dyn NewsService>>,
    pub alerts: Option<Arc<dyn AlertService>>,
    pub speech: Option<Arc<dyn SpeechToTextService>>,
}
