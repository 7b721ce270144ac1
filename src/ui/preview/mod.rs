// SPDX-License-Identifier: MPL-2.0
//! File preview modal.
//!
//! [`component`] is the orchestrator; the other modules are its
//! sub-components, one per content branch plus the loading and error
//! states.

pub mod component;
pub mod document_view;
pub mod error_state;
pub mod image_view;
pub mod loading;
pub mod shortcuts;
pub mod transport;

pub use component::{Effect, Message, Preferences, Session, State};
