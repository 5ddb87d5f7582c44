//! Back-up-if-exists primitive
//!
//! One shared implementation for all four strategies: before any destructive
//! change to an existing target, copy it into the backup root under a
//! timestamped name, adding a `-N` counter on same-second collisions. A
//! symlink at the target — broken links included — is captured as its link
//! target string in a `.link` file, never dereferenced. Backup failure is
//! always fatal to the operation it guards; the original stays untouched.

use chrono::Local;
use tracing::{debug, info};

use stratum_fs::Backend;

use crate::{Error, Result};

/// Back up `target` into `backup_root` when it exists.
///
/// Returns the backup path, or `None` when the target is absent and nothing
/// needed saving.
pub fn backup_if_exists(
    backend: &dyn Backend,
    target: &str,
    backup_root: &str,
) -> Result<Option<String>> {
    if !backend.exists(target) {
        return Ok(None);
    }

    let wrap = |e: stratum_fs::Error| Error::Backup {
        target: target.to_string(),
        reason: e.to_string(),
    };

    backend.create_dir_all(backup_root).map_err(wrap)?;

    let base_name = target.rsplit('/').next().unwrap_or(target);
    let stamp = Local::now().format("%Y%m%d-%H%M%S");

    if backend.is_symlink(target) {
        // Capture the link target string, not whatever it points at.
        let link_target = backend.read_link(target).map_err(wrap)?;
        let path = free_slot(backend, backup_root, &format!("{base_name}.{stamp}"), ".link");
        backend.write(&path, &link_target).map_err(wrap)?;
        debug!(target, backup = %path, "captured symlink target");
        return Ok(Some(path));
    }

    let path = free_slot(backend, backup_root, &format!("{base_name}.{stamp}"), "");
    if backend.is_dir(target) {
        copy_dir(backend, target, &path).map_err(|e| Error::Backup {
            target: target.to_string(),
            reason: e.to_string(),
        })?;
    } else {
        backend.copy(target, &path).map_err(wrap)?;
    }
    info!(target, backup = %path, "backed up target");
    Ok(Some(path))
}

/// First non-colliding backup path: `<stem><suffix>`, then `<stem>-1<suffix>`,
/// `<stem>-2<suffix>`, ...
fn free_slot(backend: &dyn Backend, root: &str, stem: &str, suffix: &str) -> String {
    let plain = format!("{root}/{stem}{suffix}");
    if !backend.exists(&plain) {
        return plain;
    }
    let mut counter = 1;
    loop {
        let candidate = format!("{root}/{stem}-{counter}{suffix}");
        if !backend.exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

fn copy_dir(backend: &dyn Backend, from: &str, to: &str) -> crate::Result<()> {
    backend.create_dir_all(to)?;
    for name in backend.list_dir(from)? {
        let src = format!("{from}/{name}");
        let dst = format!("{to}/{name}");
        if backend.is_dir(&src) {
            copy_dir(backend, &src, &dst)?;
        } else if backend.is_symlink(&src) {
            let link_target = backend.read_link(&src)?;
            backend.symlink(&link_target, &dst)?;
        } else {
            backend.copy(&src, &dst)?;
        }
    }
    Ok(())
}
