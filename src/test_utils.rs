// SPDX-License-Identifier: MPL-2.0
//! Shared helpers for unit tests.
//!
//! Zoom factors, page offsets and volumes are `f32`s produced by repeated
//! stepping and clamping, so tests compare them with the `approx` macros
//! rather than `assert_eq!`.

pub use approx::assert_abs_diff_eq;
