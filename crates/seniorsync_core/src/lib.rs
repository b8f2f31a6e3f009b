pub mod domain;
pub mod ports;

pub use domain::{
    Activity, ChatMessage, Confidence, EmergencyContact, FactCheckResult, GeoPoint,
    MedicationDraft, MedicationRecord, NewsArticle, RiskLevel, Role, ScamAssessment, UserContext,
    Verdict, WeatherSnapshot,
};
pub use ports::{
    AlertService, CompanionChatService, FactCheckService, MedicationStore, NewsService,
    PlacesService, PortError, PortResult, ScamAnalysisService, SpeechToTextService, WeatherService,
};
