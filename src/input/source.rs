//! Reading dump text from a file or stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{DefcheckError, Result};

/// Read a variable dump. `-` reads stdin.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
///
/// # Errors
///
/// Returns `InputNotFound` if the file doesn't exist.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        bytes
    } else {
        read_file(path)?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DefcheckError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DefcheckError::Io(e)
        }
    })
}
