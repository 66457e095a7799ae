//! A session store backed by a small JSON document on disk.
//!
//! This is the native counterpart of browser local storage: the session
//! survives process restarts until it is explicitly cleared.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rentgate_protocol::{Codec, JsonCodec};

use crate::{SessionError, SessionStore, StoredSession};

/// Persists the session entries as `{"token": "...", "role": "..."}`.
///
/// Writes go to a sibling `*.tmp` file that is then renamed over the real
/// one, so a concurrent reader sees either the old document or the new one.
/// The mutex only serializes writers inside this process.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    codec: JsonCodec,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store for the given path. Nothing is touched on disk until
    /// the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: JsonCodec,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<StoredSession, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoredSession::default()),
            Err(e) => return Err(self.io_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StoredSession::default());
        }

        self.codec.decode(&bytes).map_err(SessionError::Corrupt)
    }

    fn save(&self, record: &StoredSession) -> Result<(), SessionError> {
        let bytes = self.codec.encode(record).map_err(SessionError::Encode)?;

        let _guard = self.write_lock.lock();

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), "session file written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock();

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
