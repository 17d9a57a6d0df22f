//! Card text entry through the user's editor.

use crate::error::CliError;
use log::debug;
use std::fs;
use std::io::Write;
use std::process::Command;

/// Text a new card file starts with.
pub const PRESET_TEXT: &str = "# ";

/// Opens `$VISUAL` (else `$EDITOR`) on a temporary file holding `preset`
/// and returns what the user saved.
///
/// The editor value may carry arguments, e.g. `code --wait`.
pub fn text_from_editor(preset: &str) -> Result<String, CliError> {
    let editor = editor_command().ok_or(CliError::NoEditor)?;
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or(CliError::NoEditor)?;

    let mut file = tempfile::Builder::new()
        .prefix("new-card")
        .suffix(".md")
        .tempfile()?;
    file.write_all(preset.as_bytes())?;
    file.flush()?;

    debug!(
        "event=editor_open module=cli status=ok editor={} path={}",
        program,
        file.path().display()
    );
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()?;
    if !status.success() {
        return Err(CliError::EditorFailed {
            editor,
            status: status.to_string(),
        });
    }

    // Read by path; the editor may have replaced the file.
    Ok(fs::read_to_string(file.path())?)
}

/// Whether `text` is the untouched preset, ignoring trailing whitespace.
pub fn is_unchanged(text: &str, preset: &str) -> bool {
    text.trim_end() == preset.trim_end()
}

fn editor_command() -> Option<String> {
    ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{is_unchanged, PRESET_TEXT};

    #[test]
    fn preset_with_trailing_newline_is_unchanged() {
        assert!(is_unchanged("# \n", PRESET_TEXT));
        assert!(is_unchanged("#", PRESET_TEXT));
        assert!(!is_unchanged("# Buy paint\n", PRESET_TEXT));
    }
}
