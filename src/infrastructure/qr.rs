use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::storage::ensure_dir;

pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// Result of a best-effort QR regeneration.
///
/// A failure carries its diagnostic instead of propagating; callers decide
/// what to do with it, usually [`QrOutcome::warn_on_failure`].
#[must_use]
#[derive(Debug)]
pub enum QrOutcome {
    Written(PathBuf),
    Failed { target_url: String, error: AppError },
}

impl QrOutcome {
    /// Log a failure for the operator and drop it.
    pub fn warn_on_failure(self) -> Option<PathBuf> {
        match self {
            QrOutcome::Written(path) => Some(path),
            QrOutcome::Failed { target_url, error } => {
                warn!(target_url = %target_url, error = %error, "QR generation failed");
                None
            }
        }
    }
}

/// Writes the QR image for a URL to one fixed path.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    path: PathBuf,
    module_size: u32,
}

impl QrGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            module_size: DEFAULT_MODULE_SIZE,
        }
    }

    /// Pixel size of one QR module.
    pub fn with_module_size(mut self, module_size: u32) -> Self {
        self.module_size = module_size.max(1);
        self
    }

    /// Regenerate the image for `target_url`, overwriting any previous one.
    pub fn ensure(&self, target_url: &str) -> QrOutcome {
        match self.write(target_url) {
            Ok(()) => {
                debug!(target_url, path = %self.path.display(), "QR image written");
                QrOutcome::Written(self.path.clone())
            }
            Err(error) => QrOutcome::Failed {
                target_url: target_url.to_string(),
                error,
            },
        }
    }

    fn write(&self, target_url: &str) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::QrError(format!("Invalid QR path: {}", self.path.display()))
            })?;
        ensure_dir(dir)?;

        let code = QrCode::new(target_url.as_bytes())?;
        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(true)
            .build();

        // Readers only ever see a complete file; concurrent writers race on the rename.
        let tmp = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        if let Err(err) = image.save_with_format(&tmp, ImageFormat::Png) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }
}
