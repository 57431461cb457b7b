// SPDX-FileCopyrightText: 2026 Growth Pilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-stage strategy pipeline orchestrating the generators.
//!
//! Record Store -> Metric Aggregator -> Gating Policy -> Analysis Generator
//! -> (if unlocked) Calendar Generator. The calendar stage is reachable
//! only through [`AnalysisStage::calendar_input`], which returns `None`
//! while locked -- the gate is a type-level contract, not a runtime check
//! inside the calendar generator. Generative calls never overlap: the
//! analysis stage fully resolves before the calendar stage starts.

use std::sync::Arc;

use growthpilot_core::{GenerativeAdapter, OwnerId, PerformanceRecord, RecordStore};
use tracing::{debug, warn};

use crate::analysis::{AnalysisGenerator, AnalysisOutcome};
use crate::calendar::{CalendarEntry, CalendarGenerator};
use crate::gating::GatingState;
use crate::generator::GeneratorSettings;

/// Progress of one strategy session, for state tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Aggregating,
    AwaitingAnalysis,
    AnalysisReady,
    AwaitingCalendar,
    Complete,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Aggregating => write!(f, "aggregating"),
            PipelineStage::AwaitingAnalysis => write!(f, "awaiting-analysis"),
            PipelineStage::AnalysisReady => write!(f, "analysis-ready"),
            PipelineStage::AwaitingCalendar => write!(f, "awaiting-calendar"),
            PipelineStage::Complete => write!(f, "complete"),
        }
    }
}

/// Everything the first stage produced.
pub struct AnalysisStage {
    pub records: Vec<PerformanceRecord>,
    pub gating: GatingState,
    pub analysis: AnalysisOutcome,
}

impl AnalysisStage {
    /// Input for the second stage, available only when unlocked.
    pub fn calendar_input(&self) -> Option<CalendarInput<'_>> {
        if self.gating.locked {
            None
        } else {
            Some(CalendarInput {
                records: &self.records,
                niche: self.analysis.niche(),
            })
        }
    }
}

/// Typed handoff from the analysis stage to the calendar stage.
pub struct CalendarInput<'a> {
    pub records: &'a [PerformanceRecord],
    pub niche: &'a str,
}

/// Combined result of one strategy session.
#[derive(Debug)]
pub struct StrategyReport {
    pub gating: GatingState,
    pub analysis: AnalysisOutcome,
    /// `None` while locked; `Some(vec![])` when unlocked but generation
    /// failed or produced nothing.
    pub calendar: Option<Vec<CalendarEntry>>,
}

/// Orchestrates record loading, gating, and the two generative stages.
pub struct StrategyPipeline {
    store: Arc<dyn RecordStore>,
    analysis: AnalysisGenerator,
    calendar: CalendarGenerator,
}

impl StrategyPipeline {
    pub fn new(
        store: Arc<dyn RecordStore>,
        provider: Arc<dyn GenerativeAdapter>,
        settings: GeneratorSettings,
    ) -> Self {
        Self {
            store,
            analysis: AnalysisGenerator::new(provider.clone(), settings),
            calendar: CalendarGenerator::new(provider, settings),
        }
    }

    /// Loads the owner's records, most-recent-first.
    ///
    /// Prefers the store's ordered query. When the backend cannot service
    /// the compound ordering query, falls back to an unordered fetch plus a
    /// client-side descending sort on `created_at`. A store that fails both
    /// ways yields an empty set -- the pipeline still resolves.
    pub async fn load_records(&self, owner: &OwnerId) -> Vec<PerformanceRecord> {
        match self.store.list_by_owner(owner).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "ordered record query failed, sorting client-side");
                match self.store.list_by_owner_unordered(owner).await {
                    Ok(mut records) => {
                        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                        records
                    }
                    Err(e) => {
                        warn!(error = %e, "record fetch failed, proceeding with empty set");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Runs the first stage: load, gate, analyze. Always resolves.
    pub async fn analyze_stage(&self, owner: &OwnerId) -> AnalysisStage {
        debug!(stage = %PipelineStage::Aggregating, owner = %owner.0, "strategy session started");
        let records = self.load_records(owner).await;
        let gating = GatingState::from_count(records.len());

        debug!(stage = %PipelineStage::AwaitingAnalysis, count = records.len(), locked = gating.locked, "analyzing");
        let analysis = self.analysis.analyze(&records).await;

        debug!(stage = %PipelineStage::AnalysisReady, fallback = analysis.is_fallback(), "analysis resolved");
        AnalysisStage {
            records,
            gating,
            analysis,
        }
    }

    /// Runs the full two-stage session and returns the combined report.
    pub async fn run(&self, owner: &OwnerId) -> StrategyReport {
        let stage = self.analyze_stage(owner).await;

        let calendar = match stage.calendar_input() {
            Some(input) => {
                debug!(stage = %PipelineStage::AwaitingCalendar, niche = input.niche, "generating calendar");
                Some(self.calendar.generate(input.records, input.niche).await)
            }
            None => None,
        };

        debug!(stage = %PipelineStage::Complete, "strategy session finished");
        StrategyReport {
            gating: stage.gating,
            analysis: stage.analysis,
            calendar,
        }
    }
}
