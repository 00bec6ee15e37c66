//! Pipeline execution

use crate::config::HarnessConfig;
use crate::error::HarnessError;

use super::super::operations::{check_base_rom, ensure_output_dir, ToolRunner};
use super::super::pure::{format_invocation, plan_stages, PipelineEvent, PipelineState};
use super::super::types::{ExecutionMode, Invocation, Stage};

/// What a successful run went through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub mode: ExecutionMode,
    pub stages: Vec<Stage>,
    pub history: Vec<PipelineState>,
}

/// Tracks the state machine and remembers every state it passed through
struct Tracker {
    state: PipelineState,
    history: Vec<PipelineState>,
}

impl Tracker {
    fn new() -> Self {
        Self {
            state: PipelineState::Start,
            history: vec![PipelineState::Start],
        }
    }

    fn advance(&mut self, event: PipelineEvent) -> Result<(), HarnessError> {
        self.state = self.state.on(event)?;
        tracing::trace!("pipeline state: {:?}", self.state);
        self.history.push(self.state);
        Ok(())
    }

    fn abort<T>(&mut self, err: HarnessError) -> Result<T, HarnessError> {
        if !self.state.is_terminal() {
            self.advance(PipelineEvent::Aborted)?;
        }
        Err(err)
    }
}

/// Resolve the stages for `mode` and make sure their inputs and output directory exist.
pub fn prepare_pipeline(
    mode: ExecutionMode,
    cfg: &HarnessConfig,
) -> Result<Vec<Invocation>, HarnessError> {
    let stages = plan_stages(mode, cfg)?;
    check_base_rom(&cfg.base_rom)?;
    ensure_output_dir(&cfg.output_dir)?;
    Ok(stages)
}

/// Run every stage of `mode` in order, stopping at the first failure.
///
/// Each tool is awaited before the next one starts, so an artifact is only
/// read after the stage producing it has exited 0.
pub fn run_pipeline(
    mode: ExecutionMode,
    cfg: &HarnessConfig,
    runner: &mut dyn ToolRunner,
) -> Result<PipelineReport, HarnessError> {
    let mut tracker = Tracker::new();
    tracker.advance(PipelineEvent::ModeResolved(mode))?;

    let stages = match prepare_pipeline(mode, cfg) {
        Ok(stages) => stages,
        Err(e) => return tracker.abort(e),
    };

    for (i, inv) in stages.iter().enumerate() {
        tracker.advance(PipelineEvent::StageStarted(inv.stage))?;
        tracing::info!("Running {} ({}/{})", inv.stage, i + 1, stages.len());
        tracing::debug!("{}", format_invocation(inv, i));

        let exit = match runner.run(inv) {
            Ok(exit) => exit,
            Err(e) => return tracker.abort(e),
        };
        tracing::info!("{} exited with {}", inv.stage, exit);
        tracker.advance(PipelineEvent::StageExited(inv.stage, exit))?;

        if !exit.success() {
            return Err(HarnessError::ToolFailed {
                stage: inv.stage,
                code: exit.code,
            });
        }
    }

    tracker.advance(PipelineEvent::Finished)?;
    Ok(PipelineReport {
        mode,
        stages: stages.iter().map(|inv| inv.stage).collect(),
        history: tracker.history,
    })
}

/// Print the planned invocations without running anything
pub fn print_pipeline(mode: ExecutionMode, cfg: &HarnessConfig) -> Result<(), HarnessError> {
    println!("Mode: {}", mode);
    for (i, inv) in plan_stages(mode, cfg)?.iter().enumerate() {
        println!("{}", format_invocation(inv, i));
    }
    Ok(())
}
