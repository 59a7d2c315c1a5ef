//! Reading and writing the `data.json` consumed by the dashboard.

use std::fs::{self, File, Permissions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::RefreshResult;
use crate::rows::Rows;

/// Writes `rows` as indented UTF-8 JSON. The file is replaced in one step,
/// so readers never see a half-written file.
pub fn write_rows(path: &Path, rows: &Rows) -> RefreshResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, rows)?;
        writer.flush()?;
    }
    if let Some(perms) = target_permissions(path)? {
        tmp.as_file().set_permissions(perms)?;
    }
    tmp.persist(path)?;

    debug!(path = %path.display(), rows = rows.len(), "output written");
    Ok(())
}

/// Mode of the file being replaced, or `0o644` for a new one. The temp file
/// starts out owner-only and the dashboard may run as another user.
fn target_permissions(path: &Path) -> io::Result<Option<Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

// No mode bits to fix elsewhere.
#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

pub fn read_rows(path: &Path) -> RefreshResult<Rows> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
