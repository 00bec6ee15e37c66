//! Pure functions (mode selection, planning, state machine, formatting)

pub mod command;
pub mod mode;
pub mod plan;
pub mod state;

pub use command::format_invocation;
pub use mode::{resolve_mode, ModeFlags};
pub use plan::plan_stages;
pub use state::{PipelineEvent, PipelineState};
