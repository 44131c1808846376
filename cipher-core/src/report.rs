// File:    report.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The step report returned by the computation service and the interpretation of its responses.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Step report data model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Shown when the service reports a failure without a reason.
pub const UNKNOWN_ERROR: &str = "Unknown error";
/// Shown when a response does not have the step report shape.
pub const INVALID_RESPONSE: &str = "Invalid response format";

/// A titled block of preformatted text inside a section.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    /// The subsection heading.
    pub title: String,
    /// Preformatted content, displayed verbatim.
    pub content: String,
}

/// One stage of the computation trace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// The section heading. Sent as `section` on the wire.
    #[serde(rename = "section")]
    pub title: String,
    /// The subsections, in display order.
    pub subsections: Vec<Subsection>,
}

/// The ordered trace of an algorithm's intermediate stages.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The sections, in display order.
    pub sections: Vec<Section>,
}

/// Why a service response could not be turned into a [`StepReport`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponseError {
    /// The service answered but marked the operation unsuccessful.
    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Service(Option<String>),
    /// The response was not shaped like a step report.
    #[error("{INVALID_RESPONSE}")]
    Malformed,
}

impl StepReport {
    /// Interprets a decoded service response.
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Service`] when `success` is not `true`, carrying the
    /// service's `error` text if it sent one, and [`ResponseError::Malformed`] when
    /// the body is not an object or `sections` is missing or mis-shaped.
    pub fn from_response(response: &Value) -> Result<Self, ResponseError> {
        let Some(body) = response.as_object() else {
            return Err(ResponseError::Malformed);
        };

        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|reason| !reason.is_empty())
                .map(str::to_owned);
            return Err(ResponseError::Service(reason));
        }

        let sections = body
            .get("sections")
            .filter(|sections| sections.is_array())
            .ok_or(ResponseError::Malformed)?;
        let sections: Vec<Section> =
            serde_json::from_value(sections.clone()).map_err(|_| ResponseError::Malformed)?;

        Ok(Self { sections })
    }

    /// A hex SHA-256 fingerprint of the report's structure and text.
    ///
    /// Two reports have the same digest exactly when they have the same sections,
    /// subsections, titles and content in the same order.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.sections.len().to_le_bytes());
        for section in &self.sections {
            hash_field(&mut hasher, &section.title);
            hasher.update(section.subsections.len().to_le_bytes());
            for subsection in &section.subsections {
                hash_field(&mut hasher, &subsection.title);
                hash_field(&mut hasher, &subsection.content);
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

fn hash_field(hasher: &mut Sha256, field: &str) {
    hasher.update(field.len().to_le_bytes());
    hasher.update(field.as_bytes());
}
