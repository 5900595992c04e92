//! Payment Records
//!
//! Two record shapes: a `PendingPayment` created at registration and a
//! `ProcessedPayment` created once a card number passes the checksum.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::card::{CardNumber, MaskedCard};
use crate::error::{PaymentError, Result};

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Payment identifier (32 lowercase hex characters)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    /// Generate a new identifier
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Parse a session id taken from a URL.
    ///
    /// Accepts any UUID spelling and normalizes to the simple form.
    pub fn parse(s: &str) -> Result<Self> {
        uuid::Uuid::parse_str(s.trim())
            .map(|id| Self(id.simple().to_string()))
            .map_err(|_| PaymentError::InvalidSessionId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration request body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPayment {
    /// Amount to charge
    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    /// What the payment is for
    pub description: String,
}

impl NewPayment {
    /// Check amount and description before anything is stored
    pub fn validate(&self) -> Result<()> {
        if self.value <= Decimal::ZERO {
            return Err(PaymentError::InvalidPayment(format!(
                "value must be positive, got {}",
                self.value
            )));
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(PaymentError::InvalidPayment("description is required".into()));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(PaymentError::InvalidPayment(format!(
                "description exceeds {MAX_DESCRIPTION_LEN} characters"
            )));
        }

        Ok(())
    }
}

/// A registered payment waiting for a card number
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayment {
    #[serde(rename = "_id")]
    pub id: PaymentId,

    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    pub description: String,

    /// Expiry is measured from here
    pub created_at: DateTime<Utc>,
}

impl PendingPayment {
    pub fn new(value: Decimal, description: impl Into<String>) -> Self {
        Self {
            id: PaymentId::new(),
            value,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether `ttl` has elapsed since creation at time `now`.
    ///
    /// A deadline past the end of the calendar never expires.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.created_at
            .checked_add_signed(ttl)
            .is_some_and(|deadline| now >= deadline)
    }
}

impl From<NewPayment> for PendingPayment {
    fn from(payment: NewPayment) -> Self {
        Self::new(payment.value, payment.description.trim())
    }
}

/// A payment whose card number passed the checksum
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPayment {
    #[serde(rename = "_id")]
    pub id: PaymentId,

    /// Only the masked card is ever kept
    pub secret_number: MaskedCard,

    #[serde(with = "rust_decimal::serde::float")]
    pub value: Decimal,

    pub description: String,

    pub processed_at: DateTime<Utc>,
}

impl ProcessedPayment {
    /// Record a successful payment for a pending session
    pub fn from_pending(pending: &PendingPayment, card: &CardNumber) -> Self {
        Self {
            id: PaymentId::new(),
            secret_number: card.masked(),
            value: pending.value,
            description: pending.description.clone(),
            processed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_id_parse_normalizes() {
        let id = PaymentId::new();
        assert_eq!(id.as_str().len(), 32);
        assert_eq!(PaymentId::parse(id.as_str()).unwrap(), id);

        let hyphenated = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            PaymentId::parse(hyphenated).unwrap().as_str(),
            "67e5504410b1426f9247bb680e5fe0c8"
        );
    }

    #[test]
    fn test_payment_id_parse_rejects() {
        assert!(matches!(
            PaymentId::parse("not-an-id"),
            Err(PaymentError::InvalidSessionId(_))
        ));
        assert!(PaymentId::parse("").is_err());
    }

    #[test]
    fn test_new_payment_validation() {
        let ok = NewPayment { value: dec!(25.50), description: "Coffee beans".into() };
        assert!(ok.validate().is_ok());

        let zero = NewPayment { value: Decimal::ZERO, description: "Free".into() };
        assert!(matches!(zero.validate(), Err(PaymentError::InvalidPayment(_))));

        let negative = NewPayment { value: dec!(-1), description: "Refund".into() };
        assert!(negative.validate().is_err());

        let blank = NewPayment { value: dec!(1), description: "   ".into() };
        assert!(blank.validate().is_err());

        let long = NewPayment {
            value: dec!(1),
            description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_new_payment_from_json() {
        let payment: NewPayment =
            serde_json::from_str(r#"{"value": 12.5, "description": "Book"}"#).unwrap();
        assert_eq!(payment.value, dec!(12.5));
        assert_eq!(payment.description, "Book");
    }

    #[test]
    fn test_pending_expiry() {
        let pending = PendingPayment::new(dec!(10), "Lunch");
        let ttl = Duration::seconds(3600);
        assert!(!pending.is_expired(ttl, pending.created_at));
        assert!(!pending.is_expired(ttl, pending.created_at + Duration::seconds(3599)));
        assert!(pending.is_expired(ttl, pending.created_at + ttl));
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let pending = PendingPayment::new(dec!(10), "Lunch");
        let ttl = Duration::from_std(std::time::Duration::from_secs(10_000_000_000_000)).unwrap();
        assert!(!pending.is_expired(ttl, pending.created_at));
        assert!(!pending.is_expired(Duration::MAX, DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn test_pending_from_new_trims_description() {
        let pending = PendingPayment::from(NewPayment {
            value: dec!(3),
            description: "  Tea  ".into(),
        });
        assert_eq!(pending.description, "Tea");
        assert_eq!(pending.value, dec!(3));
    }

    #[test]
    fn test_processed_keeps_only_masked_card() {
        let pending = PendingPayment::new(dec!(99.5), "Headphones");
        let card = CardNumber::parse("4561261212345467").unwrap();
        let processed = ProcessedPayment::from_pending(&pending, &card);

        assert_eq!(processed.secret_number.as_str(), "****5467");
        assert_eq!(processed.value, pending.value);
        assert_ne!(processed.id, pending.id);

        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(json["secret_number"], "****5467");
        assert_eq!(json["value"], 99.5);
        assert!(json.get("_id").is_some());
        assert!(json.get("processed_at").is_some());
        assert!(!json.to_string().contains("4561261212345467"));
    }
}
