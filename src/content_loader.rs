use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{ParseError, Result};

const BUF_SIZE: usize = 8 * 1024;

/// Reads a `file=` body into an owned buffer.
///
/// The buffer is sized up front from the OS-reported file size and filled
/// with sequential buffered reads. Any open or read failure is fatal to the
/// whole parse.
pub fn load_contents(path: &Path) -> Result<Vec<u8>> {
    let not_found = |source| ParseError::ContentFileNotFound {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(not_found)?;
    let size = file.metadata().map_err(not_found)?.len() as usize;

    let mut contents = Vec::new();
    contents
        .try_reserve_exact(size)
        .map_err(|_| ParseError::OutOfMemory {
            path: path.to_path_buf(),
            size,
        })?;

    let mut buffer = [0u8; BUF_SIZE];
    loop {
        let read_size = file.read(&mut buffer).map_err(not_found)?;
        if read_size == 0 {
            break;
        }
        contents.extend_from_slice(&buffer[..read_size]);
    }
    Ok(contents)
}
