//! Card Number Checksum
//!
//! Mod-10 check with alternating digit doubling, computed right-to-left.
//!
//! ```text
//!   digits   4  5  6  1  2  6  1  2  1  2  3  4  5  4  6  7
//!   doubled  *     *     *     *     *     *     *     *
//!   value    8  5 12  1  4  6  2  2  2  2  6  4 10  4 12  7
//!   summed   8  5  3  1  4  6  2  2  2  2  6  4  1  4  3  7  = 60 -> valid
//! ```
//!
//! A doubled digit (0-18) contributes `c / 10 + c % 10`, which is the same as
//! summing its decimal digits.

use crate::card::CardNumber;
use crate::error::CardNumberError;

/// Digit sum before the final `mod 10`.
pub fn checksum(number: &CardNumber) -> u32 {
    let digits = number.as_str().as_bytes();
    let n = digits.len();
    // positions (1-based from the left) whose parity matches get doubled
    let parity = n.saturating_sub(1) % 2;

    let mut sum = 0;
    for i in (1..=n).rev() {
        let mut c = u32::from(digits[i - 1] - b'0');
        if parity == i % 2 {
            c *= 2;
        }
        sum += c / 10;
        sum += c % 10;
    }
    sum
}

/// Returns `true` if the card number passes the mod-10 check.
pub fn is_valid(number: &CardNumber) -> bool {
    checksum(number) % 10 == 0
}

/// Parse `input` as a card number and run the check.
///
/// Empty input and any non-digit character are rejected before the checksum
/// is computed.
pub fn check(input: &str) -> Result<bool, CardNumberError> {
    CardNumber::parse(input).map(|number| is_valid(&number))
}
