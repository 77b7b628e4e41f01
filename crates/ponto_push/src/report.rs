use ponto_common::PushSubscriptionRecord;
use serde::Serialize;

use crate::error::PushFailure;

/// What a successful client operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Subscribed(PushSubscriptionRecord),
    AlreadySubscribed,
    Unsubscribed,
    /// Unsubscribe was asked with nothing to remove
    NotSubscribed,
}

impl PushOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            PushOutcome::Subscribed(_) => "subscribed",
            PushOutcome::AlreadySubscribed => "already_subscribed",
            PushOutcome::Unsubscribed => "unsubscribed",
            PushOutcome::NotSubscribed => "not_subscribed",
        }
    }
}

/// `{success, status?, error?, subscription?}` for UI bridges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<PushSubscriptionRecord>,
}

impl From<&Result<PushOutcome, PushFailure>> for PushReport {
    fn from(result: &Result<PushOutcome, PushFailure>) -> Self {
        match result {
            Ok(outcome) => PushReport {
                success: true,
                status: Some(outcome.status().to_string()),
                error: None,
                subscription: match outcome {
                    PushOutcome::Subscribed(record) => Some(record.clone()),
                    _ => None,
                },
            },
            Err(failure) => PushReport {
                success: false,
                status: None,
                error: Some(failure.to_string()),
                subscription: None,
            },
        }
    }
}

impl From<Result<PushOutcome, PushFailure>> for PushReport {
    fn from(result: Result<PushOutcome, PushFailure>) -> Self {
        PushReport::from(&result)
    }
}
