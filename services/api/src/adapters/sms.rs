//! services/api/src/adapters/sms.rs
//!
//! This module contains the adapter for the Twilio SMS API.
//! It implements the `AlertService` port from the `core` crate.
//!
//! Delivery to each number is attempted independently; one provider failure
//! never aborts the remaining sends.

use async_trait::async_trait;
use futures::future::join_all;
use seniorsync_core::ports::{AlertService, PortError, PortResult};
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AlertService` port against the Twilio
/// Messages REST API.
#[derive(Clone)]
pub struct TwilioAlertAdapter {
    http: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioAlertAdapter {
    /// Creates a new `TwilioAlertAdapter`.
    pub fn new(
        http: reqwest::Client,
        account_sid: String,
        auth_token: String,
        from_number: String,
    ) -> Self {
        Self {
            http,
            account_sid,
            auth_token,
            from_number,
        }
    }

    /// The alert text interpolating the user's name and optional location.
    fn alert_message(user_name: &str, location: Option<&str>) -> String {
        let mut message = format!("EMERGENCY: {} needs help immediately!", user_name);
        if let Some(location) = location {
            message.push_str(&format!(" Location: {}", location));
        }
        message.push_str(" Please check on them right away.");
        message
    }

    /// Sends one message to one number.
    async fn send_one(&self, to_number: &str, body: &str) -> PortResult<()> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to_number),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PortError::Timeout
                } else {
                    PortError::Upstream(e.to_string())
                }
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PortError::Upstream(format!(
                "Twilio returned status {}",
                response.status()
            )))
        }
    }
}

//=========================================================================================
// `AlertService` Trait Implementation
//=========================================================================================

#[async_trait]
impl AlertService for TwilioAlertAdapter {
    /// Attempts delivery to every number and returns how many succeeded.
    async fn send_alert(
        &self,
        numbers: &[String],
        user_name: &str,
        location: Option<&str>,
    ) -> PortResult<usize> {
        let body = Self::alert_message(user_name, location);

        let attempts = numbers.iter().map(|number| {
            let body = body.clone();
            async move { (number, self.send_one(number, &body).await) }
        });

        let mut delivered = 0;
        for (number, result) in join_all(attempts).await {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Alert delivery to {} failed: {}", number, e),
            }
        }

        Ok(delivered)
    }
}
