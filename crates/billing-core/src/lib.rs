//! # billing-core
//!
//! Card checksum validation, payment records and storage for card-billing.
//!
//! ## Payment Flow
//!
//! ```text
//! ┌────────────┐  register   ┌────────────────┐  card form   ┌──────────────┐
//! │   Client   │────────────▶│ PendingPayment │─────────────▶│ luhn::check  │
//! │            │  value +    │  (expires, 1h) │  sessionId + │  (mod-10)    │
//! └────────────┘ description └────────────────┘  cardNumber  └──────┬───────┘
//!                                                                   │ valid
//!                                                                   ▼
//!                                                        ┌────────────────────┐
//!                                                        │  ProcessedPayment  │
//!                                                        │  "****" + last 4   │
//!                                                        └────────────────────┘
//! ```
//!
//! The checksum has no dependency on storage or HTTP:
//!
//! ```rust
//! use billing_core::{luhn, CardNumber};
//!
//! assert_eq!(luhn::check("4561261212345467"), Ok(true));
//! assert_eq!(luhn::check("4561261212345464"), Ok(false));
//! assert!(luhn::check("4561-2612").is_err());
//!
//! let card: CardNumber = "4561261212345467".parse().unwrap();
//! assert_eq!(card.masked().as_str(), "****5467");
//! ```

pub mod card;
pub mod error;
pub mod luhn;
pub mod payment;
pub mod store;

pub use card::{CardNumber, MaskedCard};
pub use error::{CardNumberError, PaymentError, Result};
pub use payment::{NewPayment, PaymentId, PendingPayment, ProcessedPayment};
pub use store::{MemoryPaymentStore, PaymentStore};
