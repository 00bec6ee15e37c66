//! Mode selection (pure, no side effects)

use super::super::types::ExecutionMode;

/// The mode flags as given on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub direct: bool,
    pub patch_and_run: bool,
}

/// Result of mode resolution, including flags that lost to a higher-priority one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: ExecutionMode,
    pub ignored: Vec<&'static str>,
}

/// Pick the execution mode. First match in priority order wins:
/// `--direct`, then `--patch`, then the full pipeline when neither is set.
pub fn resolve_mode(flags: ModeFlags) -> ModeSelection {
    let candidates = [
        (flags.direct, "--direct", ExecutionMode::Direct),
        (flags.patch_and_run, "--patch", ExecutionMode::PatchAndRun),
    ];

    let mut set = candidates.iter().filter(|(enabled, _, _)| *enabled);
    let Some((_, _, mode)) = set.next() else {
        return ModeSelection {
            mode: ExecutionMode::DefaultFull,
            ignored: Vec::new(),
        };
    };

    ModeSelection {
        mode: *mode,
        ignored: set.map(|(_, flag, _)| *flag).collect(),
    }
}
