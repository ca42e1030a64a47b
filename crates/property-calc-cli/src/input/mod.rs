pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Where a command takes its input from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    File(&'a str),
    Flags,
    Stdin,
}

/// `--input` wins; a complete set of flags comes next; piped stdin is
/// consulted only when neither is available.
pub fn select_source(path: Option<&str>, flags_complete: bool) -> InputSource<'_> {
    match path {
        Some(path) => InputSource::File(path),
        None if flags_complete => InputSource::Flags,
        None => InputSource::Stdin,
    }
}

/// Structured input from `--input <file.json>`, else from piped stdin when
/// the flags are incomplete. `None` means the caller builds input from flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    flags_complete: bool,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match select_source(path, flags_complete) {
        InputSource::File(path) => {
            debug!(path, "reading input file");
            Ok(Some(file::read_json(path)?))
        }
        InputSource::Flags => Ok(None),
        InputSource::Stdin => {
            let piped = stdin::read_stdin()?;
            if piped.is_some() {
                debug!("reading input from stdin");
            }
            Ok(piped)
        }
    }
}
