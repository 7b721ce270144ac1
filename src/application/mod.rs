// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for rendering and playback engines
//! - [`preview`]: The preview pipeline (load dispatch, PDF rasterization,
//!   word-document conversion chain, object URLs)
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services

pub mod port;
pub mod preview;
