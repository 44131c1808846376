// File:    validate.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Field-kind validators that accumulate every failure before a request is dispatched.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Input validation.
//!
//! A [`Validator`] offers one check per field kind (presence, binary pattern,
//! integer range, permutation table, substitution box, square matrix, column
//! permutation). Checks never stop at the first failure; every message is
//! collected into a [`ValidationErrors`] set that keeps first-seen order and
//! drops duplicates.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::key_order::is_permutation;

/// The ordered, duplicate-free messages explaining why a submission was rejected.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    /// Adds a message unless an identical one is already present.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.messages.contains(&message) {
            self.messages.push(message);
        }
    }

    /// Whether no message has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The number of distinct messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether `message` was recorded.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// The messages in the order they were first recorded.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("\n"))
    }
}

/// Parses a form field as an integer, ignoring surrounding whitespace.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Whether `value` is exactly `len` characters, each `0` or `1`.
#[must_use]
pub fn is_binary(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b == b'0' || b == b'1')
}

/// Collects validation failures for one submission.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    /// Starts an empty validation pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `condition` holds.
    pub fn require(&mut self, condition: bool, message: &str) {
        if !condition {
            self.errors.push(message);
        }
    }

    /// Requires a value that is not blank.
    pub fn non_empty(&mut self, value: &str, message: &str) {
        self.require(!value.trim().is_empty(), message);
    }

    /// Requires exactly `len` binary digits.
    pub fn binary(&mut self, value: &str, len: usize, message: &str) {
        self.require(is_binary(value, len), message);
    }

    /// Requires an integer within `range`. Returns the value when it parsed,
    /// even if it was out of range, so later cross-field checks can use it.
    pub fn int_in_range(
        &mut self,
        raw: &str,
        range: RangeInclusive<i64>,
        message: &str,
    ) -> Option<i64> {
        let value = parse_int(raw);
        self.require(value.is_some_and(|v| range.contains(&v)), message);
        value
    }

    /// Requires an integer, with no bound.
    pub fn int(&mut self, raw: &str, message: &str) -> Option<i64> {
        self.int_in_range(raw, i64::MIN..=i64::MAX, message)
    }

    /// Validates a permutation table: `len` entries, each an index in `range`.
    ///
    /// Unparseable entries come back as `0`; they have already been reported.
    pub fn table(
        &mut self,
        raw: &[String],
        len: usize,
        range: RangeInclusive<i64>,
        length_message: &str,
        range_message: &str,
    ) -> Vec<i64> {
        self.require(raw.len() == len, length_message);
        raw.iter()
            .map(|entry| {
                self.int_in_range(entry, range.clone(), range_message)
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Validates a 4×4 substitution box of two-bit binary strings.
    pub fn sbox(&mut self, raw: &[Vec<String>], shape_message: &str, entry_message: &str) {
        self.require(
            raw.len() == 4 && raw.iter().all(|row| row.len() == 4),
            shape_message,
        );
        for entry in raw.iter().flatten() {
            self.binary(entry.trim(), 2, entry_message);
        }
    }

    /// Validates an `m`×`m` integer matrix whose entries fall in `range`.
    pub fn square_matrix(
        &mut self,
        raw: &[Vec<String>],
        m: usize,
        range: RangeInclusive<i64>,
        shape_message: &str,
        entry_message: &str,
    ) -> Vec<Vec<i64>> {
        self.require(
            raw.len() == m && raw.iter().all(|row| row.len() == m),
            shape_message,
        );
        raw.iter()
            .map(|row| {
                row.iter()
                    .map(|entry| {
                        self.int_in_range(entry, range.clone(), entry_message)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    /// Validates a column order against its keyword: one rank per letter,
    /// forming a permutation of `1..=expected_len`.
    pub fn column_order(
        &mut self,
        raw: &[String],
        expected_len: usize,
        length_message: &str,
        permutation_message: &str,
    ) -> Vec<usize> {
        let parsed: Vec<Option<usize>> = raw.iter().map(|r| r.trim().parse().ok()).collect();
        self.require(raw.len() == expected_len, length_message);
        let order: Vec<usize> = parsed.iter().map(|r| r.unwrap_or_default()).collect();
        self.require(
            parsed.iter().all(Option::is_some) && is_permutation(&order),
            permutation_message,
        );
        order
    }

    /// Ends the pass.
    ///
    /// # Errors
    ///
    /// Returns every recorded message if any check failed.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
