//! Locating the entry page and the browser data directory

use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Result, ShellError};

/// Directory containing the running executable
pub fn exe_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ShellError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

/// Join a config path onto `base` unless it is already absolute
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// `file://` URL for the entry page. The file must exist.
pub fn entry_url(path: &Path) -> Result<Url> {
    if !path.is_file() {
        return Err(ShellError::EntryNotFound(path.to_path_buf()));
    }
    let absolute = path.canonicalize()?;
    Url::from_file_path(&absolute).map_err(|_| ShellError::InvalidEntry(absolute))
}
