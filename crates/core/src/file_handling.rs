//! Whole-file reads and writes shared by the profile and alias stores.
//!
//! Writes truncate and rewrite the target in place. There is no temp file and
//! no rename, so an interrupted write can leave a truncated file behind, and
//! there is no locking against other writers (last writer wins).

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// UTF-8 byte order mark, which the Azure CLI sometimes writes
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Strips a leading UTF-8 byte order mark, if present.
#[must_use]
pub fn strip_bom(contents: &[u8]) -> &[u8] {
    contents.strip_prefix(UTF8_BOM).unwrap_or(contents)
}

/// Reads a whole file, mapping "does not exist" to `None`.
pub fn read_optional(file_description: &str, path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No {file_description} file at `{}`", path.display());
            Ok(None)
        }
        Err(e) => Err(Error::io_error(
            file_description,
            &path.display().to_string(),
            e,
        )),
    }
}

/// Overwrites `path` with `contents` in a single create-truncate-write.
///
/// When `create_parent` is set, missing parent directories are created first.
/// Newly created files are readable by the owner only on Unix.
pub fn write_whole_file(
    file_description: &str,
    path: &Path,
    contents: &[u8],
    create_parent: bool,
) -> Result<()> {
    let path_string = path.display().to_string();
    let to_io_error = |e: std::io::Error| Error::io_error(file_description, &path_string, e);

    if create_parent {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_io_error)?;
        }
    }

    let mut file = open_for_overwrite(path).map_err(to_io_error)?;
    file.write_all(contents).map_err(to_io_error)?;
    file.flush().map_err(to_io_error)?;

    debug!("Wrote {} bytes to {file_description} file at `{path_string}`", contents.len());
    Ok(())
}

fn open_for_overwrite(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    options.open(path)
}
