//! Checks on file names built from remote identifiers.

use crate::error::{Error, Result};

/// Make sure `name` stays a single entry inside the target folder.
///
/// Media files are named `{id}.{ext}` from server data, so only the
/// characters that could escape the folder or break the path are refused.
/// The name is otherwise used as is.
pub fn check_file_name(name: &str) -> Result<&str> {
    let reason = if name.trim().is_empty() {
        "empty name"
    } else if name.contains(['/', '\\']) {
        "path separator"
    } else if name.contains("..") {
        "parent reference"
    } else if name.contains('\0') {
        "NUL byte"
    } else {
        return Ok(name);
    };

    Err(Error::InvalidFilename(format!("{}: {:?}", reason, name)))
}
