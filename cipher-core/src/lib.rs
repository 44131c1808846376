// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The main library crate for cipher-core, shared by the command-line and web front ends.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Cipher Core Library
//!
//! This library holds everything the cipher workbench front ends share: the
//! keyword column-order ranking, the step report model and its collapsible
//! presentation, input validation, and the coordinator that sends requests to
//! the computation service.

/// Transport to the remote computation service.
pub mod client;
/// Submission state machine and request routing.
pub mod coordinator;
/// Raw page input and the per-cipher validation rules.
pub mod input;
/// Column order derivation for columnar transposition.
pub mod key_order;
/// User preferences and per-session application state.
pub mod preferences;
/// Presentation tree for step reports.
pub mod render;
/// Step report data model.
pub mod report;
/// Request payloads for the computation service.
pub mod request;
/// Field-kind validators.
pub mod validate;
