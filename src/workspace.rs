//! Log discovery and text supply
//!
//! The scan core only consumes log text; locating it is this module's job.
//! Xcode keeps build logs under DerivedData as gzip-compressed
//! `.xcactivitylog` files, one product directory per project
//! (`<Product>-<hash>/Logs/Build/*.xcactivitylog`).

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use flate2::read::GzDecoder;
use walkdir::WalkDir;

/// Supplies the full log text for one scan
///
/// `None` is the explicit "no text available" signal; the controller turns
/// it into an immediate empty, complete result.
pub trait LogSource {
    fn log_text(&self) -> Option<String>;
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A single log file on disk, gzip-compressed or plain text
#[derive(Debug, Clone)]
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogSource for LogFile {
    fn log_text(&self) -> Option<String> {
        read_log_text(&self.path)
    }
}

/// Read a log file as text, gunzipping when the gzip magic is present
///
/// Declaration excerpts in real logs are not guaranteed valid UTF-8, so the
/// decode is lossy. Any I/O failure degrades to the "no text" signal.
fn read_log_text(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "log read failed");
            return None;
        }
    };

    let bytes = if bytes.starts_with(&GZIP_MAGIC) {
        let mut decoded = Vec::new();
        match GzDecoder::new(bytes.as_slice()).read_to_end(&mut decoded) {
            Ok(_) => decoded,
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "gzip decode failed");
                return None;
            }
        }
    } else {
        bytes
    };

    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Finds the newest activity log for a product under a DerivedData root
#[derive(Debug, Clone)]
pub struct DerivedDataLocator {
    root: PathBuf,
    product: String,
    completed_after: Option<SystemTime>,
}

impl DerivedDataLocator {
    /// Locator over Xcode's default DerivedData directory
    ///
    /// Returns `None` when no home directory can be resolved.
    pub fn new(product: &str) -> Option<Self> {
        Self::default_root().map(|root| Self::with_root(root, product))
    }

    pub fn with_root(root: impl Into<PathBuf>, product: &str) -> Self {
        Self {
            root: root.into(),
            product: product.to_string(),
            completed_after: None,
        }
    }

    /// Only consider logs modified at or after a build-completion timestamp
    pub fn completed_after(mut self, timestamp: SystemTime) -> Self {
        self.completed_after = Some(timestamp);
        self
    }

    /// `~/Library/Developer/Xcode/DerivedData`
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join("Library/Developer/Xcode/DerivedData"))
    }

    /// Newest matching `.xcactivitylog`, if any
    fn newest_log(&self) -> Option<PathBuf> {
        let mut newest: Option<(SystemTime, PathBuf)> = None;

        for product_dir in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
        {
            let name = product_dir.file_name().to_string_lossy();
            if name != self.product && !name.starts_with(&format!("{}-", self.product)) {
                continue;
            }

            let build_logs = product_dir.path().join("Logs").join("Build");
            for entry in WalkDir::new(build_logs)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                if entry.path().extension().is_none_or(|ext| ext != "xcactivitylog") {
                    continue;
                }
                let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok())
                else {
                    continue;
                };
                if self.completed_after.is_some_and(|after| modified < after) {
                    continue;
                }
                if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
                    newest = Some((modified, entry.path().to_path_buf()));
                }
            }
        }

        if newest.is_none() {
            tracing::debug!(product = %self.product, root = %self.root.display(), "no activity log found");
        }
        newest.map(|(_, path)| path)
    }
}

impl LogSource for DerivedDataLocator {
    fn log_text(&self) -> Option<String> {
        read_log_text(&self.newest_log()?)
    }
}
