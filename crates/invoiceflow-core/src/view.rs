//! # View State
//!
//! Which screen the invoice editor shows and whether a request is running.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Details(Editing) ──begin_generate──► Details(Generating)              │
//! │        ▲    │                               │        │                  │
//! │        │    │ show_preview                  │        │ generation_failed│
//! │        │    │ (PDF exists)       generated  │        ▼                  │
//! │        │    │                               │   Details(Editing)        │
//! │        │    ▼                               ▼                           │
//! │        └─ Preview(Ready) ◄──────────────────┘                           │
//! │  show_details  │    ▲                                                   │
//! │                │    │ send_finished                                     │
//! │      begin_send▼    │                                                   │
//! │           Preview(Sending)                                              │
//! │                                                                         │
//! │  Any other (state, action) pair is CoreError::InvalidTransition.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The busy states (`Generating`, `Sending`) are what stop a second
//! submission while one is outstanding.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DetailsMode {
    Editing,
    Generating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    Ready,
    Sending,
}

/// The editor's current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "view", content = "mode", rename_all = "lowercase")]
pub enum ViewState {
    Details(DetailsMode),
    Preview(PreviewMode),
}

impl ViewState {
    pub const fn initial() -> Self {
        ViewState::Details(DetailsMode::Editing)
    }

    /// A request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ViewState::Details(DetailsMode::Generating) | ViewState::Preview(PreviewMode::Sending)
        )
    }

    pub fn begin_generate(&mut self) -> CoreResult<()> {
        self.transition("generate", |state| match state {
            ViewState::Details(DetailsMode::Editing) => {
                Some(ViewState::Details(DetailsMode::Generating))
            }
            _ => None,
        })
    }

    pub fn generated(&mut self) -> CoreResult<()> {
        self.transition("finish generating", |state| match state {
            ViewState::Details(DetailsMode::Generating) => {
                Some(ViewState::Preview(PreviewMode::Ready))
            }
            _ => None,
        })
    }

    pub fn generation_failed(&mut self) -> CoreResult<()> {
        self.transition("abort generating", |state| match state {
            ViewState::Details(DetailsMode::Generating) => {
                Some(ViewState::Details(DetailsMode::Editing))
            }
            _ => None,
        })
    }

    pub fn begin_send(&mut self) -> CoreResult<()> {
        self.transition("send", |state| match state {
            ViewState::Preview(PreviewMode::Ready) => {
                Some(ViewState::Preview(PreviewMode::Sending))
            }
            _ => None,
        })
    }

    /// Back to `Preview(Ready)` whether the send succeeded or not.
    pub fn send_finished(&mut self) -> CoreResult<()> {
        self.transition("finish sending", |state| match state {
            ViewState::Preview(PreviewMode::Sending) => {
                Some(ViewState::Preview(PreviewMode::Ready))
            }
            _ => None,
        })
    }

    pub fn show_details(&mut self) -> CoreResult<()> {
        self.transition("show details", |state| match state {
            ViewState::Preview(PreviewMode::Ready) => {
                Some(ViewState::Details(DetailsMode::Editing))
            }
            _ => None,
        })
    }

    /// Only allowed once a PDF has been generated for this invoice.
    pub fn show_preview(&mut self, pdf_available: bool) -> CoreResult<()> {
        self.transition("show preview", |state| match state {
            ViewState::Details(DetailsMode::Editing) if pdf_available => {
                Some(ViewState::Preview(PreviewMode::Ready))
            }
            _ => None,
        })
    }

    fn transition<F>(&mut self, action: &'static str, next: F) -> CoreResult<()>
    where
        F: FnOnce(ViewState) -> Option<ViewState>,
    {
        match next(*self) {
            Some(state) => {
                *self = state;
                Ok(())
            }
            None => Err(CoreError::InvalidTransition {
                state: self.to_string(),
                action,
            }),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewState::Details(DetailsMode::Editing) => "editing",
            ViewState::Details(DetailsMode::Generating) => "generating",
            ViewState::Preview(PreviewMode::Ready) => "previewing",
            ViewState::Preview(PreviewMode::Sending) => "sending",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
