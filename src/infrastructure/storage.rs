use std::fs;
use std::path::{Component, Path, PathBuf};

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Whether `path` is made of plain names only (no root, prefix, `.` or `..`).
pub fn is_plain_relative(path: &Path) -> bool {
    let mut components = path.components().peekable();
    components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_)))
}

/// Join an untrusted relative path onto `base`, refusing anything that could
/// step outside it.
pub fn join_within(base: &Path, untrusted: &str) -> Option<PathBuf> {
    let relative = Path::new(untrusted);
    if untrusted.contains('\\') || !is_plain_relative(relative) {
        return None;
    }
    Some(base.join(relative))
}
