// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Growth strategy engine.
//!
//! Aggregates logged performance records into engagement metrics, gates
//! calendar generation behind a data-sufficiency threshold, and drives a
//! two-stage structured-output call sequence against a generative provider
//! with deterministic fallbacks. Every public operation is total: failures
//! resolve to a fallback analysis, an empty calendar, or a descriptive
//! rewrite string -- never a propagated error.

pub mod analysis;
pub mod calendar;
pub mod gating;
pub mod generator;
pub mod metrics;
pub mod pipeline;
pub mod prompt;
pub mod rewrite;

pub use analysis::{AnalysisGenerator, AnalysisOutcome, AnalysisResult};
pub use calendar::{CalendarEntry, CalendarGenerator};
pub use gating::{GatingState, UNLOCK_THRESHOLD};
pub use generator::GeneratorSettings;
pub use metrics::{engagement_score, summarize, MetricSummary};
pub use pipeline::{AnalysisStage, CalendarInput, StrategyPipeline, StrategyReport};
pub use rewrite::RewriteGenerator;
