//! Pipeline state machine (pure)
//!
//! Start → ModeSelected → Running → Done → Running → ... → Succeeded.
//! A failing stage (or an abort before any stage) goes straight to Failed.
//! Succeeded and Failed accept no further events.

use crate::error::HarnessError;

use super::super::types::{ExecutionMode, Stage, ToolExit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    ModeSelected(ExecutionMode),
    Running(Stage),
    Done(Stage),
    Succeeded,
    /// `stage` is `None` when the run failed before any tool started
    Failed { stage: Option<Stage> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineEvent {
    ModeResolved(ExecutionMode),
    StageStarted(Stage),
    StageExited(Stage, ToolExit),
    /// Every planned stage has exited successfully
    Finished,
    /// Something outside a tool's exit status stopped the run
    Aborted,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed { .. })
    }

    /// Apply `event`, or report why it isn't allowed from this state.
    pub fn on(self, event: PipelineEvent) -> Result<PipelineState, HarnessError> {
        use PipelineEvent as E;
        use PipelineState as S;

        let next = match (self, event) {
            (S::Start, E::ModeResolved(mode)) => S::ModeSelected(mode),
            (S::ModeSelected(_) | S::Done(_), E::StageStarted(stage)) => S::Running(stage),
            (S::Running(running), E::StageExited(stage, exit)) if running == stage => {
                if exit.success() {
                    S::Done(stage)
                } else {
                    S::Failed { stage: Some(stage) }
                }
            }
            (S::Done(_), E::Finished) => S::Succeeded,
            (S::Running(stage), E::Aborted) => S::Failed { stage: Some(stage) },
            (S::Start | S::ModeSelected(_) | S::Done(_), E::Aborted) => S::Failed { stage: None },
            (from, event) => {
                return Err(HarnessError::InvalidTransition {
                    from,
                    event: format!("{event:?}"),
                });
            }
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::types::OutputKind;

    const GEN: Stage = Stage::Generate(OutputKind::Patch);

    #[test]
    fn happy_path_reaches_succeeded() {
        let events = [
            PipelineEvent::ModeResolved(ExecutionMode::PatchAndRun),
            PipelineEvent::StageStarted(GEN),
            PipelineEvent::StageExited(GEN, ToolExit::SUCCESS),
            PipelineEvent::StageStarted(Stage::Apply),
            PipelineEvent::StageExited(Stage::Apply, ToolExit::SUCCESS),
            PipelineEvent::Finished,
        ];
        let end = events
            .into_iter()
            .try_fold(PipelineState::Start, PipelineState::on)
            .unwrap();
        assert_eq!(end, PipelineState::Succeeded);
    }

    #[test]
    fn non_zero_exit_fails_the_stage() {
        let state = PipelineState::Running(Stage::Compress)
            .on(PipelineEvent::StageExited(
                Stage::Compress,
                ToolExit { code: Some(2) },
            ))
            .unwrap();
        assert_eq!(
            state,
            PipelineState::Failed {
                stage: Some(Stage::Compress)
            }
        );
        assert!(state.is_terminal());
    }

    #[test]
    fn signal_exit_fails_the_stage() {
        let state = PipelineState::Running(Stage::Emulate)
            .on(PipelineEvent::StageExited(Stage::Emulate, ToolExit { code: None }))
            .unwrap();
        assert!(matches!(state, PipelineState::Failed { .. }));
    }

    #[test]
    fn abort_before_any_stage_has_no_stage() {
        let state = PipelineState::ModeSelected(ExecutionMode::Direct)
            .on(PipelineEvent::Aborted)
            .unwrap();
        assert_eq!(state, PipelineState::Failed { stage: None });
    }

    #[test]
    fn terminal_states_reject_every_event() {
        let terminals = [PipelineState::Succeeded, PipelineState::Failed { stage: None }];
        let events = [
            PipelineEvent::ModeResolved(ExecutionMode::Direct),
            PipelineEvent::StageStarted(GEN),
            PipelineEvent::StageExited(GEN, ToolExit::SUCCESS),
            PipelineEvent::Finished,
            PipelineEvent::Aborted,
        ];
        for state in terminals {
            for event in events {
                assert!(state.on(event).is_err(), "{state:?} accepted {event:?}");
            }
        }
    }

    #[test]
    fn stage_cannot_start_while_another_runs() {
        let err = PipelineState::Running(GEN)
            .on(PipelineEvent::StageStarted(Stage::Apply))
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidTransition { .. }));
    }

    #[test]
    fn exit_of_a_different_stage_is_rejected() {
        assert!(
            PipelineState::Running(GEN)
                .on(PipelineEvent::StageExited(Stage::Apply, ToolExit::SUCCESS))
                .is_err()
        );
    }

    #[test]
    fn mode_is_selected_only_once() {
        assert!(
            PipelineState::ModeSelected(ExecutionMode::Direct)
                .on(PipelineEvent::ModeResolved(ExecutionMode::DefaultFull))
                .is_err()
        );
    }
}
