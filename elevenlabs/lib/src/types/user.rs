//! Account, subscription and quota information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, unix_to_utc};

/// A language supported by an available model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLanguage {
    pub iso_code: String,
    pub display_name: String,
}

/// A model the subscription is entitled to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableModel {
    pub model_id: String,
    pub display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supported_language: Vec<SupportedLanguage>,
}

/// The upcoming invoice for a paid subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextInvoice {
    pub amount_due_cents: i64,
    pub next_payment_attempt_unix: i64,
}

impl NextInvoice {
    pub fn next_payment_attempt(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.next_payment_attempt_unix)
    }
}

/// Quota and billing details from `GET /user/subscription`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    pub tier: String,
    pub character_count: u64,
    pub character_limit: u64,
    pub can_extend_character_limit: bool,
    pub allowed_to_extend_character_limit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_character_count_reset_unix: Option<i64>,
    pub voice_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_voice_add_edits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_add_edit_counter: Option<u32>,
    pub professional_voice_limit: u32,
    pub can_extend_voice_limit: bool,
    pub can_use_instant_voice_cloning: bool,
    pub can_use_professional_voice_cloning: bool,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub available_models: Vec<AvailableModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_use_delayed_payment_methods: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_invoice: Option<NextInvoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_open_invoices: Option<bool>,
}

impl SubscriptionInfo {
    /// When the character counter resets.
    pub fn next_character_count_reset(&self) -> Option<DateTime<Utc>> {
        self.next_character_count_reset_unix.and_then(unix_to_utc)
    }

    /// Characters left in the current period.
    pub fn characters_remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }
}

/// Account details from `GET /user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub subscription: SubscriptionInfo,
    #[serde(default)]
    pub is_new_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xi_api_key: Option<String>,
    #[serde(default)]
    pub can_use_delayed_payment_methods: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn subscription_json() -> serde_json::Value {
        json!({
            "tier": "creator",
            "character_count": 17231,
            "character_limit": 100000,
            "can_extend_character_limit": true,
            "allowed_to_extend_character_limit": true,
            "next_character_count_reset_unix": 1738356858,
            "voice_limit": 30,
            "professional_voice_limit": 1,
            "can_extend_voice_limit": false,
            "can_use_instant_voice_cloning": true,
            "can_use_professional_voice_cloning": true,
            "available_models": [
                {
                    "model_id": "eleven_multilingual_v2",
                    "display_name": "Eleven Multilingual v2",
                    "supported_language": [
                        { "iso_code": "en", "display_name": "English" }
                    ]
                }
            ],
            "currency": "usd",
            "status": "active",
            "billing_period": "monthly_period",
            "next_invoice": {
                "amount_due_cents": 2200,
                "next_payment_attempt_unix": 1738356858
            }
        })
    }

    #[test]
    fn test_subscription_round_trip() {
        let input = subscription_json();
        let info: SubscriptionInfo = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(info.available_models[0].supported_language[0].iso_code, "en");
        assert_eq!(serde_json::to_value(&info).unwrap(), input);
    }

    #[test]
    fn test_subscription_computed_fields() {
        let info: SubscriptionInfo = serde_json::from_value(subscription_json()).unwrap();
        assert_eq!(info.characters_remaining(), 100000 - 17231);
        assert!(info.next_character_count_reset().is_some());
        assert_eq!(
            info.next_invoice.as_ref().unwrap().next_payment_attempt(),
            info.next_character_count_reset()
        );
    }

    #[test]
    fn test_user_info_parses_nested_subscription() {
        let user: UserInfo = serde_json::from_value(json!({
            "subscription": subscription_json(),
            "is_new_user": false,
            "xi_api_key": "sk_redacted",
            "can_use_delayed_payment_methods": false,
            "first_name": "Ada"
        }))
        .unwrap();
        assert_eq!(user.subscription.tier, "creator");
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
    }
}
