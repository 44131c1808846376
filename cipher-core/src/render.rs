// File:    render.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Maps step reports onto a collapsible presentation tree that any front end can draw.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The report presentation tree.
//!
//! [`render`] is a pure mapping from a [`StepReport`] to a [`ReportView`]. The view
//! owns the collapse state of each section; front ends draw it and call
//! [`ReportView::toggle`] in response to explicit user action.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::report::{StepReport, Subsection};

/// Marker drawn in front of an expanded section header.
pub const EXPANDED_MARKER: char = '▼';
/// Marker drawn in front of a collapsed section header.
pub const COLLAPSED_MARKER: char = '▶';

/// A collapsible block presenting one report section.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SectionBlock {
    /// 1-based position of the section in the report.
    pub number: usize,
    /// The section heading.
    pub title: String,
    /// Subsections shown in the block body, in report order.
    pub subsections: Vec<Subsection>,
    /// Whether the body is visible.
    pub expanded: bool,
}

/// The presentation of a whole report.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportView {
    /// One block per section, top to bottom.
    pub blocks: Vec<SectionBlock>,
}

/// What a front end shows in the results area.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    /// A fully rendered report.
    Report(ReportView),
    /// A single message shown in place of the report.
    Diagnostic {
        /// The message text.
        message: String,
    },
}

/// Builds the presentation tree for `report`. Every block starts expanded.
#[must_use]
pub fn render(report: &StepReport) -> ReportView {
    let blocks = report
        .sections
        .iter()
        .enumerate()
        .map(|(idx, section)| SectionBlock {
            number: idx + 1,
            title: section.title.clone(),
            subsections: section.subsections.clone(),
            expanded: true,
        })
        .collect();
    ReportView { blocks }
}

/// Renders a raw service response.
///
/// Never fails: anything that is not a successful, well-formed step report
/// becomes a single diagnostic and nothing is partially rendered.
#[must_use]
pub fn render_response(response: &Value) -> Presentation {
    match StepReport::from_response(response) {
        Ok(report) => Presentation::Report(render(&report)),
        Err(e) => Presentation::Diagnostic {
            message: e.to_string(),
        },
    }
}

impl ReportView {
    /// Flips the collapse state of the block numbered `number` (1-based).
    ///
    /// Returns the new expanded state, or `None` if there is no such block.
    /// No other block is affected.
    pub fn toggle(&mut self, number: usize) -> Option<bool> {
        let block = self.blocks.iter_mut().find(|b| b.number == number)?;
        block.expanded = !block.expanded;
        Some(block.expanded)
    }

    /// Whether the block numbered `number` is expanded.
    #[must_use]
    pub fn is_expanded(&self, number: usize) -> Option<bool> {
        self.blocks
            .iter()
            .find(|b| b.number == number)
            .map(|b| b.expanded)
    }
}

impl fmt::Display for SectionBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.expanded {
            EXPANDED_MARKER
        } else {
            COLLAPSED_MARKER
        };
        writeln!(f, "{marker} {}. {}", self.number, self.title)?;
        if !self.expanded {
            return Ok(());
        }
        for subsection in &self.subsections {
            writeln!(f, "  [{}]", subsection.title)?;
            writeln!(f, "{}", subsection.content)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        Ok(())
    }
}
