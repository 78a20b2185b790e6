//! Integration with the Teller Connect bank-enrollment widget.
//!
//! The widget itself runs in the user's browser; this module owns the parameters it is set up
//! with and the handling of its lifecycle callbacks. The only callback with real work to do is
//! `on_success`, which must forward the enrollment payload verbatim to the backend.

use crate::model::Enrollment;
use crate::store::BankStore;
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// The environment the Teller Connect widget is pointed at.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TellerEnvironment {
    #[default]
    Sandbox,
    Development,
    Production,
}

serde_plain::derive_display_from_serialize!(TellerEnvironment);
serde_plain::derive_fromstr_from_deserialize!(TellerEnvironment);

/// The setup parameters handed to the Teller Connect widget.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    pub application_id: String,
    pub environment: TellerEnvironment,
}

/// Handles the Teller Connect widget's lifecycle callbacks.
pub struct Connect {
    options: ConnectOptions,
}

impl Connect {
    pub fn new(config: &Config) -> Self {
        Self {
            options: ConnectOptions {
                application_id: config.application_id().to_string(),
                environment: config.environment(),
            },
        }
    }

    /// The parameters the widget should be set up with.
    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    /// Called when the widget has initialized.
    pub fn on_init(&self) {
        debug!("Teller Connect has initialized");
    }

    /// Called when the user completes enrollment successfully. Forwards the enrollment payload
    /// verbatim to the backend and refreshes the institution list. Failure propagates so the
    /// caller can prompt the user to retry.
    pub async fn on_success(&self, bank: &mut BankStore, enrollment: &Enrollment) -> Result<()> {
        debug!(
            "Enrollment successful for {}",
            enrollment.institution_name().unwrap_or("unknown institution")
        );
        bank.store_token(enrollment).await
    }

    /// Called when the user exits without enrolling. Logged only; not an error.
    pub fn on_exit(&self) {
        info!("User exited Teller Connect without enrolling");
    }

    /// Called when the widget reports a failure. Logged only.
    pub fn on_failure(&self, failure: &serde_json::Value) {
        error!("Teller Connect failure: {failure}");
    }
}
