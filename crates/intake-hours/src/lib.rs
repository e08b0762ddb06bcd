// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pure business-hours window evaluation.
//!
//! All timezone and date arithmetic for the engine is isolated here behind
//! [`evaluate`], a pure function of `(config, now)`. No clocks, no I/O; the
//! same inputs always produce the same verdict, which is what makes the
//! admission pipeline unit-testable without wall-clock dependence.

mod calculator;

pub use calculator::{evaluate, HoursVerdict};
