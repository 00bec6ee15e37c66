// Pure invocation formatting (no I/O)

use super::super::types::{Invocation, StdinSource, StdoutSink};

/// Format an invocation for debug logging, shell-style.
///
/// Text payloads are shown after the command since they have no file to point at.
pub fn format_invocation(inv: &Invocation, i: usize) -> String {
    let mut output = format!("STAGE {} ({}): \"{}\"", i + 1, inv.stage, inv.program);

    for arg in &inv.args {
        output.push_str(&format!(" \"{}\"", arg));
    }

    if let StdinSource::File(path) = &inv.stdin {
        output.push_str(&format!(" < \"{}\"", path.display()));
    }

    match &inv.stdout {
        StdoutSink::Inherit => {}
        StdoutSink::Discard => output.push_str(" > /dev/null"),
        StdoutSink::Capture(path) => output.push_str(&format!(" > \"{}\"", path.display())),
    }

    if let StdinSource::Text(payload) = &inv.stdin {
        output.push_str(&format!("\n  stdin: {}", payload));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::types::{OutputKind, Stage};
    use std::path::PathBuf;

    fn inv(stdin: StdinSource, stdout: StdoutSink) -> Invocation {
        Invocation {
            stage: Stage::Generate(OutputKind::Patch),
            program: "cargo".to_string(),
            args: vec!["run".to_string(), "--".to_string()],
            stdin,
            stdout,
        }
    }

    #[test]
    fn format_stage_numbering_is_one_based() {
        let output = format_invocation(&inv(StdinSource::Inherit, StdoutSink::Inherit), 0);
        assert!(output.starts_with("STAGE 1 (generator (patch)):"));
    }

    #[test]
    fn format_quotes_program_and_args() {
        let output = format_invocation(&inv(StdinSource::Inherit, StdoutSink::Inherit), 2);
        assert!(output.contains("\"cargo\" \"run\" \"--\""));
    }

    #[test]
    fn format_shows_redirections() {
        let output = format_invocation(
            &inv(
                StdinSource::File(PathBuf::from("/roms/base.n64")),
                StdoutSink::Capture(PathBuf::from("/out/default.zpf")),
            ),
            0,
        );
        assert!(output.ends_with("< \"/roms/base.n64\" > \"/out/default.zpf\""));
    }

    #[test]
    fn format_discard_goes_to_dev_null() {
        let output = format_invocation(&inv(StdinSource::Inherit, StdoutSink::Discard), 0);
        assert!(output.ends_with("> /dev/null"));
    }

    #[test]
    fn format_shows_text_payload() {
        let output = format_invocation(
            &inv(StdinSource::Text("{\"a\":1}".to_string()), StdoutSink::Inherit),
            1,
        );
        assert!(output.ends_with("\n  stdin: {\"a\":1}"));
    }
}
