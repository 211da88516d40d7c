//! Space sentinel for XML-bound conversions.
//!
//! When the conversion target is XML, spaces in a textual input file are
//! rewritten to an underscore sentinel before reading, so that values
//! survive as single XML tokens. The guard restores the original bytes
//! afterwards: explicitly via [`XmlSafetyGuard::restore`] on the normal
//! path, and from `Drop` as a backstop when the conversion bails out
//! early.
//!
//! The rewrite is byte-level, like the delimiter normalization in
//! [`dialect`](crate::dialect): the file's encoding is never touched, so
//! latin-1 and other non-UTF-8 inputs round-trip exactly. Binary formats
//! (XLSX) must not pass through here at all; the dispatcher skips the
//! codec for them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::logs::log_warning;

/// The byte substituted for spaces while the guard is engaged.
pub const SENTINEL: u8 = b'_';

/// RAII guard over an input file whose spaces have been rewritten.
///
/// While engaged, the file on disk holds the sentinel form. Restoring
/// maps every sentinel back to a space.
#[derive(Debug)]
pub struct XmlSafetyGuard {
    path: PathBuf,
    engaged: bool,
}

impl XmlSafetyGuard {
    /// Rewrite spaces in `path` to the sentinel and return a guard that
    /// undoes the rewrite.
    ///
    /// A file without spaces leaves the guard disengaged and the file
    /// untouched.
    pub fn engage(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let engaged = bytes.contains(&b' ');
        if engaged {
            fs::write(path, swap_bytes(bytes, b' ', SENTINEL))?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            engaged,
        })
    }

    /// Whether the file currently holds the sentinel form.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Restore the original spaces and consume the guard.
    pub fn restore(mut self) -> io::Result<()> {
        self.restore_inner()
    }

    fn restore_inner(&mut self) -> io::Result<()> {
        if !self.engaged {
            return Ok(());
        }
        let bytes = fs::read(&self.path)?;
        fs::write(&self.path, swap_bytes(bytes, SENTINEL, b' '))?;
        self.engaged = false;
        Ok(())
    }
}

fn swap_bytes(bytes: Vec<u8>, from: u8, to: u8) -> Vec<u8> {
    bytes
        .into_iter()
        .map(|b| if b == from { to } else { b })
        .collect()
}

impl Drop for XmlSafetyGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore_inner() {
            log_warning(&format!(
                "Could not restore {}: {e}",
                self.path.display()
            ));
        }
    }
}
