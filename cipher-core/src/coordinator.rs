// File:    coordinator.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Drives one submission from raw page input to a rendered report or a diagnostic.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Request coordination.
//!
//! Each page owns a [`TriggerControl`]. A submission moves it through
//! `Idle → Validating → (Rejected | Dispatching) → (Rendered | Failed) → Idle`;
//! the control reports itself disabled until the submission leaves, whichever
//! way it leaves, and refuses a second submission while one is in flight.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::client::{Transport, TransportError};
use crate::input::RawInput;
use crate::report::{ResponseError, StepReport};
use crate::request::{CipherKind, CipherRequest};
use crate::validate::ValidationErrors;

/// Where a page's submission currently is.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    /// Nothing in flight; the trigger is enabled.
    #[default]
    Idle,
    /// Input is being normalized and checked.
    Validating,
    /// Input failed validation; nothing was sent.
    Rejected,
    /// The request is with the computation service.
    Dispatching,
    /// A report came back.
    Rendered,
    /// The service, the response or the connection failed.
    Failed,
}

/// Which boundary a failed submission broke at.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The service marked the operation unsuccessful.
    Service,
    /// The response was not a step report.
    MalformedResponse,
    /// The request could not be completed.
    Transport,
}

/// The single message shown when a dispatched submission fails.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where it failed.
    pub kind: FailureKind,
    /// The message to show.
    pub message: String,
}

impl Diagnostic {
    fn transport(reason: impl fmt::Display) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: format!("Error connecting to server: {reason}"),
        }
    }
}

impl From<ResponseError> for Diagnostic {
    fn from(e: ResponseError) -> Self {
        let kind = match e {
            ResponseError::Service(_) => FailureKind::Service,
            ResponseError::Malformed => FailureKind::MalformedResponse,
        };
        Self {
            kind,
            message: e.to_string(),
        }
    }
}

impl From<TransportError> for Diagnostic {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Decode(_) => ResponseError::Malformed.into(),
            TransportError::Request(e) => Self::transport(e),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service returned a report.
    Rendered(StepReport),
    /// Validation failed and nothing was sent.
    Rejected(ValidationErrors),
    /// The request was sent but no report came back.
    Failed(Diagnostic),
    /// Another submission from the same page is still in flight.
    Busy,
}

#[derive(Debug, Default)]
struct TriggerState {
    current: SubmissionState,
    transitions: Vec<SubmissionState>,
}

impl TriggerState {
    fn enter(&mut self, next: SubmissionState) {
        debug!("Submission state {:?} -> {next:?}", self.current);
        self.current = next;
        self.transitions.push(next);
    }
}

/// A page's submit control.
#[derive(Debug)]
pub struct TriggerControl {
    idle_label: &'static str,
    busy_label: &'static str,
    state: Mutex<TriggerState>,
}

impl TriggerControl {
    /// Creates an enabled control.
    #[must_use]
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            state: Mutex::default(),
        }
    }

    /// The control for `kind`'s page, labelled as that page labels it.
    #[must_use]
    pub fn for_kind(kind: CipherKind) -> Self {
        match kind {
            CipherKind::KeyedColumnar | CipherKind::Monoalphabetic | CipherKind::RailFence => {
                Self::new("Process", "Processing...")
            }
            CipherKind::Playfair | CipherKind::Sdes | CipherKind::Vigenere => {
                Self::new("Encrypt", "Processing...")
            }
            CipherKind::Hill | CipherKind::Rsa => Self::new("Encrypt & Decrypt", "Processing..."),
            CipherKind::Adfgvx => Self::new("Encrypt / Decrypt", "Processing..."),
            CipherKind::Euler
            | CipherKind::ExtendedEuclidean
            | CipherKind::Gcd
            | CipherKind::ModExp
            | CipherKind::Fermat => Self::new("Calculate", "Calculating..."),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The current submission state.
    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.lock().current
    }

    /// Whether the control accepts a new submission.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state() == SubmissionState::Idle
    }

    /// The text the control shows right now.
    #[must_use]
    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            self.idle_label
        } else {
            self.busy_label
        }
    }

    /// Every state the latest submission passed through, ending in `Idle`
    /// once it has finished.
    #[must_use]
    pub fn last_transitions(&self) -> Vec<SubmissionState> {
        self.lock().transitions.clone()
    }

    /// Starts a submission, or returns `None` if one is already in flight.
    ///
    /// The control stays disabled until the returned guard is dropped.
    #[must_use]
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        let mut state = self.lock();
        if state.current != SubmissionState::Idle {
            return None;
        }
        state.transitions.clear();
        state.enter(SubmissionState::Validating);
        Some(InFlight { control: self })
    }
}

/// An in-flight submission. Dropping it re-enables the control.
#[derive(Debug)]
pub struct InFlight<'a> {
    control: &'a TriggerControl,
}

impl InFlight<'_> {
    /// Moves the submission to its next state.
    pub fn advance(&self, next: SubmissionState) {
        self.control.lock().enter(next);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.control.lock().enter(SubmissionState::Idle);
    }
}

/// Validates page input, dispatches it and routes the reply.
#[derive(Debug)]
pub struct Coordinator<T> {
    transport: T,
    triggers: BTreeMap<CipherKind, TriggerControl>,
}

impl<T: Transport> Coordinator<T> {
    /// Creates a coordinator with one idle trigger per page.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let triggers = CipherKind::ALL
            .into_iter()
            .map(|kind| (kind, TriggerControl::for_kind(kind)))
            .collect();
        Self {
            transport,
            triggers,
        }
    }

    /// The transport requests go through.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The submit control of `kind`'s page.
    #[must_use]
    pub fn trigger(&self, kind: CipherKind) -> &TriggerControl {
        // Every kind gets a trigger in `new`.
        &self.triggers[&kind]
    }

    /// Runs one submission to completion.
    ///
    /// Invalid input is rejected with every failure and no request is sent.
    /// Valid input produces exactly one request; the reply becomes a report or
    /// a single diagnostic. The page's trigger is disabled for the duration and
    /// restored on every exit path.
    pub async fn submit(&self, input: &RawInput) -> Outcome {
        let kind = input.kind();
        let Some(flight) = self.trigger(kind).try_begin() else {
            warn!("A {kind} submission is already in flight; ignoring the new one.");
            return Outcome::Busy;
        };
        let submission = Uuid::new_v4();
        debug!("[{submission}] Validating {kind} input.");

        let request = match input.validate() {
            Ok(request) => request,
            Err(errors) => {
                flight.advance(SubmissionState::Rejected);
                info!(
                    "[{submission}] Rejected {kind} input with {} validation error(s).",
                    errors.len()
                );
                return Outcome::Rejected(errors);
            }
        };

        flight.advance(SubmissionState::Dispatching);
        debug!("[{submission}] Dispatching to {}.", request.endpoint());
        match self.dispatch(&request).await {
            Ok(report) => {
                flight.advance(SubmissionState::Rendered);
                info!(
                    "[{submission}] Received a {}-section {kind} report.",
                    report.sections.len()
                );
                Outcome::Rendered(report)
            }
            Err(diagnostic) => {
                flight.advance(SubmissionState::Failed);
                warn!("[{submission}] {kind} submission failed: {diagnostic}");
                Outcome::Failed(diagnostic)
            }
        }
    }

    /// Sends an already validated request and interprets the reply.
    ///
    /// # Errors
    ///
    /// Returns a [`Diagnostic`] for service-reported failures, malformed
    /// replies and transport failures.
    pub async fn dispatch(&self, request: &CipherRequest) -> Result<StepReport, Diagnostic> {
        let payload = request.to_payload().map_err(Diagnostic::transport)?;
        let reply = self.transport.post(request.endpoint(), &payload).await?;
        Ok(StepReport::from_response(&reply)?)
    }
}
