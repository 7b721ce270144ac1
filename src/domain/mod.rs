// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core rules independent of the GUI toolkit.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives on persisted values it depends only on `std`
//! and the centralized defaults.
//!
//! # Modules
//!
//! - [`cursor`]: Cursor-trail settings ([`EffectSet`](cursor::EffectSet),
//!   [`HexColor`](cursor::HexColor), [`EffectConfiguration`](cursor::EffectConfiguration))
//! - [`preview`]: Preview session types ([`LoadedContent`](preview::LoadedContent),
//!   [`PageCursor`](preview::PageCursor), [`ImageZoom`](preview::ImageZoom),
//!   [`TransportState`](preview::TransportState))

pub mod cursor;
pub mod preview;
