//! File-system helpers for reading and atomically replacing targets.
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfpatchError;

/// Read `path` as UTF-8 text, or `None` when it does not exist.
///
/// # Errors
///
/// Returns [`ConfpatchError::Io`] for any failure other than a missing file,
/// including invalid UTF-8.
pub fn read_text(path: &Path) -> Result<Option<String>, ConfpatchError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(io_error(path, source)),
    }
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ConfpatchError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    Ok(())
}

/// Replace `path` with `contents` through a sibling temporary file and a
/// rename, so readers see either the old or the new file.
///
/// Permissions of an existing target carry over to the replacement.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or renamed.
/// The temporary file is removed on failure.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ConfpatchError> {
    ensure_parent_dir(path)?;
    let tmp = temp_sibling(path);

    let result = std::fs::write(&tmp, contents)
        .and_then(|()| match std::fs::metadata(path) {
            Ok(meta) => std::fs::set_permissions(&tmp, meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        })
        .and_then(|()| std::fs::rename(&tmp, path));

    result.map_err(|source| {
        std::fs::remove_file(&tmp).ok();
        tracing::debug!("removed temporary file {}", tmp.display());
        io_error(path, source)
    })
}

/// `.<name>.confpatch-<pid>.tmp` next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(format!(".confpatch-{}.tmp", std::process::id()));
    path.with_file_name(name)
}

fn io_error(path: &Path, source: io::Error) -> ConfpatchError {
    ConfpatchError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn read_text_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_text(&dir.path().join("absent.conf")).unwrap(), None);
    }

    #[test]
    fn read_text_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(dir.path()).unwrap_err();
        assert!(matches!(err, ConfpatchError::Io { .. }));
    }

    #[test]
    fn write_atomic_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wireguard/wg0.conf");
        write_atomic(&path, b"[Interface]\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[Interface]\n");
    }

    #[test]
    fn write_atomic_replaces_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unit.service");
        std::fs::write(&path, "old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![OsString::from("unit.service")]);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wg0.conf");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        write_atomic(&path, b"new").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn temp_sibling_is_hidden_next_to_target() {
        let tmp = temp_sibling(Path::new("/etc/wireguard/wg0.conf"));
        assert_eq!(tmp.parent(), Some(Path::new("/etc/wireguard")));
        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".wg0.conf.confpatch-"));
        assert!(name.ends_with(".tmp"));
    }
}
