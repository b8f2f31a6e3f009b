//! services/api/src/adapters/mod.rs
//!
//! Outbound adapters implementing the service ports, plus the shared
//! upstream time bound every adapter call runs under.

use std::future::Future;
use std::time::Duration;

use seniorsync_core::ports::{PortError, PortResult};

pub mod chat_llm;
pub mod fact_llm;
pub mod news;
pub mod places;
pub mod scam_llm;
pub mod sms;
pub mod store;
pub mod stt;
pub mod weather;

pub use chat_llm::OpenAiChatAdapter;
pub use fact_llm::OpenAiFactCheckAdapter;
pub use news::NewsApiAdapter;
pub use places::GooglePlacesAdapter;
pub use scam_llm::OpenAiScamAdapter;
pub use sms::TwilioAlertAdapter;
pub use store::InMemoryMedicationStore;
pub use stt::OpenAiSttAdapter;
pub use weather::OpenWeatherAdapter;

/// Bounded wait applied to every upstream call. Single attempt only;
/// exceeding this maps to `PortError::Timeout` and the handler decides
/// whether to fall back.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs one upstream call under the shared bound.
pub(crate) async fn bounded<T, F>(fut: F) -> PortResult<T>
where
    F: Future<Output = PortResult<T>>,
{
    match tokio::time::timeout(UPSTREAM_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(PortError::Timeout),
    }
}
