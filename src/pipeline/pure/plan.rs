//! Stage planning (pure, no I/O)

use crate::config::{HarnessConfig, ToolCommand};
use crate::error::HarnessError;

use super::super::types::{
    ApplierSettings, ExecutionMode, Invocation, OutputKind, Stage, StdinSource, StdoutSink,
};

/// Build the ordered tool invocations for `mode`.
///
/// The result lists exactly the tools that mode runs, in the order they run.
pub fn plan_stages(
    mode: ExecutionMode,
    cfg: &HarnessConfig,
) -> Result<Vec<Invocation>, HarnessError> {
    let mut stages = match mode {
        ExecutionMode::Direct => {
            return Ok(vec![generate(cfg, OutputKind::None, StdoutSink::Discard)]);
        }
        ExecutionMode::PatchAndRun => vec![
            generate(cfg, OutputKind::Patch, StdoutSink::Capture(cfg.patch_path())),
            apply(cfg)?,
        ],
        ExecutionMode::DefaultFull => vec![
            generate(
                cfg,
                OutputKind::UncompressedRom,
                StdoutSink::Capture(cfg.uncompressed_rom_path()),
            ),
            compress(cfg),
        ],
    };

    if cfg.launch_emulator {
        stages.push(emulate(cfg));
    }
    Ok(stages)
}

/// The settings object handed to the applier for this config
pub fn applier_settings(cfg: &HarnessConfig) -> ApplierSettings {
    ApplierSettings {
        generate_from_file: true,
        rom: cfg.base_rom.clone(),
        patch_file: cfg.patch_path(),
        output_dir: cfg.output_dir.clone(),
    }
}

fn invocation(
    stage: Stage,
    tool: &ToolCommand,
    extra: impl IntoIterator<Item = String>,
    stdin: StdinSource,
    stdout: StdoutSink,
) -> Invocation {
    let mut args = tool.args.clone();
    args.extend(extra);
    Invocation {
        stage,
        program: tool.program.clone(),
        args,
        stdin,
        stdout,
    }
}

fn generate(cfg: &HarnessConfig, kind: OutputKind, stdout: StdoutSink) -> Invocation {
    let selector = ["--output-type".to_string(), kind.as_arg().to_string()];
    invocation(
        Stage::Generate(kind),
        &cfg.generator,
        cfg.generator_args.iter().cloned().chain(selector),
        StdinSource::File(cfg.base_rom.clone()),
        stdout,
    )
}

fn apply(cfg: &HarnessConfig) -> Result<Invocation, HarnessError> {
    let payload = serde_json::to_string(&applier_settings(cfg)).map_err(|e| {
        HarnessError::Settings {
            stage: Stage::Apply,
            source: e.into(),
        }
    })?;
    Ok(invocation(
        Stage::Apply,
        &cfg.applier,
        [],
        StdinSource::Text(payload),
        StdoutSink::Inherit,
    ))
}

fn compress(cfg: &HarnessConfig) -> Invocation {
    invocation(
        Stage::Compress,
        &cfg.compressor,
        [
            cfg.uncompressed_rom_path().display().to_string(),
            cfg.compressed_rom_path().display().to_string(),
        ],
        StdinSource::Inherit,
        StdoutSink::Inherit,
    )
}

fn emulate(cfg: &HarnessConfig) -> Invocation {
    invocation(
        Stage::Emulate,
        &cfg.emulator,
        [cfg.compressed_rom_path().display().to_string()],
        StdinSource::Inherit,
        StdoutSink::Inherit,
    )
}
