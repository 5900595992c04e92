//! Card Numbers
//!
//! A `CardNumber` only exists for strings made of ASCII digits, so the
//! checksum never sees anything else. Formatting always masks the digits.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CardNumberError;
use crate::luhn;

/// Prefix replacing all but the last four digits
const MASK: &str = "****";

/// Number of trailing digits kept visible
const VISIBLE_DIGITS: usize = 4;

/// A validated, digits-only card number
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

impl CardNumber {
    /// Parse from form input. No separators are stripped.
    pub fn parse(s: &str) -> Result<Self, CardNumberError> {
        if s.is_empty() {
            return Err(CardNumberError::Empty);
        }

        if let Some((position, ch)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(CardNumberError::InvalidCharacter { ch, position });
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no digits
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digit values, left to right
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b - b'0')
    }

    /// Run the mod-10 check
    pub fn is_valid(&self) -> bool {
        luhn::is_valid(self)
    }

    /// Masked form safe to store and log
    pub fn masked(&self) -> MaskedCard {
        let start = self.0.len().saturating_sub(VISIBLE_DIGITS);
        MaskedCard(format!("{MASK}{}", &self.0[start..]))
    }
}

impl FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked().as_str()).finish()
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Masked card representation (`****` + last 4 digits)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaskedCard(String);

impl MaskedCard {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaskedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
