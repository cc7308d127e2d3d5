//! Sequential fail-fast execution of the selected stages.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use super::{RunClassification, RunRequest, RunResult, StageReport, UnitFailure};
use crate::core::{RunState, StageStatus};
use crate::events::{EventSink, LoggingEventSink};
use crate::runner::{UnitEnvironment, UnitRunner};
use crate::stages::{StageDefinition, StageRegistry};

/// Runs stages one at a time, one unit at a time, stopping at the first failure.
///
/// The executor holds no mutable state, so a single instance can serve
/// successive runs. It never retries and never reverts unit side effects.
#[derive(Debug, Clone)]
pub struct PipelineExecutor {
    registry: Arc<StageRegistry>,
    runner: Arc<dyn UnitRunner>,
    events: Arc<dyn EventSink>,
}

impl PipelineExecutor {
    /// Creates an executor over a validated registry.
    #[must_use]
    pub fn new(registry: Arc<StageRegistry>, runner: Arc<dyn UnitRunner>) -> Self {
        Self {
            registry,
            runner,
            events: Arc::new(LoggingEventSink::default()),
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the registry this executor runs.
    #[must_use]
    pub fn registry(&self) -> &StageRegistry {
        &self.registry
    }

    /// Executes the request and returns its summary.
    ///
    /// Unit failures never escape as errors; they end the run and are
    /// recorded in [`RunResult::failure`].
    pub async fn run(&self, request: &RunRequest) -> RunResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline.run", %run_id);
        self.execute(run_id, request).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid, request: &RunRequest) -> RunResult {
        let stages_to_run = self
            .registry
            .select_stages(request.selected_ordinals.as_ref());
        let total_stages = stages_to_run.len();
        let env = request.unit_environment();

        let started_at = Utc::now();
        let start = Instant::now();

        let mut state = RunState::default().start();

        self.events.try_emit(
            "pipeline.started",
            Some(json!({
                "run_id": run_id,
                "state": state,
                "total_stages": total_stages,
                "row_subset_limit": request.row_subset_limit,
            })),
        );
        info!(total_stages, row_subset_limit = ?request.row_subset_limit, "Pipeline started");

        let mut succeeded_stages = 0;
        let mut reports = Vec::with_capacity(total_stages);
        let mut failure = None;

        for stage in stages_to_run {
            let span = info_span!("stage", ordinal = stage.ordinal, stage = %stage.name);
            let (report, stage_failure) = self.run_stage(stage, &env).instrument(span).await;
            reports.push(report);

            if let Some(stage_failure) = stage_failure {
                error!(ordinal = stage.ordinal, "Pipeline failed at Step {}", stage.ordinal);
                failure = Some(stage_failure);
                break;
            }
            succeeded_stages += 1;
        }

        let duration = start.elapsed();
        state = state.finish(failure.is_some());

        let classification =
            RunClassification::classify(total_stages, succeeded_stages, self.registry.len());
        let failed_ordinal = failure.as_ref().map(|f| f.ordinal);

        self.events.try_emit(
            "pipeline.completed",
            Some(json!({
                "run_id": run_id,
                "state": state,
                "succeeded_stages": succeeded_stages,
                "total_stages": total_stages,
                "failed_ordinal": failed_ordinal,
                "duration_ms": duration.as_secs_f64() * 1000.0,
            })),
        );

        if classification.is_success() {
            info!(%classification, duration_ms = duration.as_secs_f64() * 1000.0, "Pipeline finished");
        } else {
            error!(%classification, duration_ms = duration.as_secs_f64() * 1000.0, "Pipeline finished");
        }

        RunResult {
            run_id,
            total_stages,
            succeeded_stages,
            failed_ordinal,
            duration,
            started_at,
            finished_at: Utc::now(),
            state,
            classification,
            stages: reports,
            failure,
        }
    }

    /// Runs every unit of one stage, stopping at the first failing unit.
    async fn run_stage(
        &self,
        stage: &StageDefinition,
        env: &UnitEnvironment,
    ) -> (StageReport, Option<UnitFailure>) {
        let start = Instant::now();
        let mut units_invoked = 0;
        let mut failure = None;
        let mut status = StageStatus::default();

        info!("Starting {}: {}", stage, stage.description);
        status = status.start();
        self.events.try_emit(
            "stage.started",
            Some(json!({"ordinal": stage.ordinal, "name": &stage.name, "status": status})),
        );

        for unit in &stage.units {
            let outcome = match self.runner.resolve(unit) {
                Ok(()) => {
                    info!("Running notebook: {} (Step {} - {})", unit, stage.ordinal, stage.name);
                    self.events.try_emit(
                        "unit.started",
                        Some(json!({"ordinal": stage.ordinal, "unit": unit})),
                    );
                    units_invoked += 1;
                    self.runner.run_unit(unit, env).await
                }
                Err(not_found) => Err(not_found),
            };

            match outcome {
                Ok(output) => {
                    self.events.try_emit(
                        "unit.completed",
                        Some(json!({
                            "ordinal": stage.ordinal,
                            "unit": unit,
                            "duration_ms": output.duration.as_secs_f64() * 1000.0,
                        })),
                    );
                }
                Err(err) => {
                    let unit_failure = UnitFailure::from_error(stage, unit, &err);
                    error!(
                        ordinal = stage.ordinal,
                        stage = %stage.name,
                        unit = %unit,
                        kind = %unit_failure.kind,
                        diagnostic = unit_failure.diagnostic.as_deref(),
                        "{}",
                        unit_failure.message
                    );
                    self.events.try_emit(
                        "unit.failed",
                        Some(json!({
                            "ordinal": stage.ordinal,
                            "unit": unit,
                            "kind": unit_failure.kind,
                            "message": &unit_failure.message,
                            "diagnostic": &unit_failure.diagnostic,
                        })),
                    );
                    failure = Some(unit_failure);
                    break;
                }
            }
        }

        let duration = start.elapsed();
        status = status.finish(failure.is_some());
        let event_type = if failure.is_some() {
            "stage.failed"
        } else {
            "stage.completed"
        };
        self.events.try_emit(
            event_type,
            Some(json!({
                "ordinal": stage.ordinal,
                "name": &stage.name,
                "status": status,
                "duration_ms": duration.as_secs_f64() * 1000.0,
            })),
        );

        let report = StageReport {
            ordinal: stage.ordinal,
            name: stage.name.clone(),
            status,
            units_invoked,
            duration,
        };
        (report, failure)
    }
}
