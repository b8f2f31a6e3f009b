//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        GooglePlacesAdapter, InMemoryMedicationStore, NewsApiAdapter, OpenAiChatAdapter,
        OpenAiFactCheckAdapter, OpenAiScamAdapter, OpenAiSttAdapter, OpenWeatherAdapter,
        TwilioAlertAdapter, UPSTREAM_TIMEOUT,
    },
    config::Config,
    error::ApiError,
    web::{
        activities::search_activities_handler,
        chat::chat_handler,
        emergency::send_alert_handler,
        fact_check::check_claim_handler,
        health_handler,
        medications::{
            create_medication_handler, delete_medication_handler, list_medications_handler,
            update_medication_handler,
        },
        news::get_news_handler,
        root_handler,
        scam::{analyze_handler, examples_handler},
        speech::{transcribe_handler, transcribe_translate_handler},
        state::AppState,
        weather::current_weather_handler,
        ApiDoc,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use seniorsync_core::ports::{
    AlertService, CompanionChatService, FactCheckService, NewsService, PlacesService,
    ScamAnalysisService, SpeechToTextService, WeatherService,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    // Every adapter is optional. A missing credential degrades only that
    // capability; the service itself always starts.
    let http = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .map_err(|e| ApiError::Internal(format!("Failed to build HTTP client: {}", e)))?;

    let openai_client = config.openai_api_key.as_ref().map(|key| {
        Client::with_config(OpenAIConfig::new().with_api_key(key.clone()))
    });
    if openai_client.is_none() {
        warn!("OPENAI_API_KEY not set; chat, scam, fact-check and speech are disabled");
    }

    let chat: Option<Arc<dyn CompanionChatService>> = openai_client.as_ref().map(|client| {
        Arc::new(OpenAiChatAdapter::new(client.clone(), config.chat_model.clone())) as _
    });
    let scam: Option<Arc<dyn ScamAnalysisService>> = openai_client.as_ref().map(|client| {
        Arc::new(OpenAiScamAdapter::new(client.clone(), config.analysis_model.clone())) as _
    });
    let fact_check: Option<Arc<dyn FactCheckService>> = openai_client.as_ref().map(|client| {
        Arc::new(OpenAiFactCheckAdapter::new(client.clone(), config.analysis_model.clone())) as _
    });
    let speech: Option<Arc<dyn SpeechToTextService>> = openai_client.as_ref().map(|client| {
        Arc::new(OpenAiSttAdapter::new(client.clone(), config.stt_model.clone())) as _
    });

    let weather: Option<Arc<dyn WeatherService>> = config.openweather_api_key.as_ref().map(|key| {
        Arc::new(OpenWeatherAdapter::new(http.clone(), key.clone())) as _
    });
    if weather.is_none() {
        warn!("OPENWEATHER_API_KEY not set; weather serves fallback payloads");
    }

    let places: Option<Arc<dyn PlacesService>> = config.google_maps_api_key.as_ref().map(|key| {
        Arc::new(GooglePlacesAdapter::new(http.clone(), key.clone())) as _
    });
    if places.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set; activities serve the mock list");
    }

    let news: Option<Arc<dyn NewsService>> = config.news_api_key.as_ref().map(|key| {
        Arc::new(NewsApiAdapter::new(http.clone(), key.clone())) as _
    });
    if news.is_none() {
        warn!("NEWS_API_KEY not set; news serves fallback headlines");
    }

    let alerts: Option<Arc<dyn AlertService>> = config.twilio.as_ref().map(|twilio| {
        Arc::new(TwilioAlertAdapter::new(
            http.clone(),
            twilio.account_sid.clone(),
            twilio.auth_token.clone(),
            twilio.from_number.clone(),
        )) as _
    });
    if alerts.is_none() {
        warn!("Twilio credentials not set; emergency alerts run in demo mode");
    }

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        config: config.clone(),
        medications: Arc::new(InMemoryMedicationStore::new()),
        chat,
        scam,
        fact_check,
        weather,
        places,
        news,
        alerts,
        speech,
    });

    // --- 4. Configure CORS for the frontend origins ---
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    let api_router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/ai/chat", post(chat_handler))
        .route("/api/medications/", post(create_medication_handler))
        .route(
            "/api/medications/{id}",
            get(list_medications_handler)
                .put(update_medication_handler)
                .delete(delete_medication_handler),
        )
        .route("/api/scam/analyze", post(analyze_handler))
        .route("/api/scam/examples", get(examples_handler))
        .route("/api/emergency/alert", post(send_alert_handler))
        .route("/api/activities/search", post(search_activities_handler))
        .route("/api/fact-check/check", post(check_claim_handler))
        .route("/api/weather/current", post(current_weather_handler))
        .route("/api/news/news", get(get_news_handler))
        .route("/api/speech/transcribe", post(transcribe_handler))
        .route(
            "/api/speech/transcribe-translate",
            post(transcribe_translate_handler),
        )
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
