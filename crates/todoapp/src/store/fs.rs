use super::SnapshotStore;
use crate::error::{Result, TodoError};
use crate::model::{Snapshot, UserId};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SLOT_PREFIX: &str = "user-";
const SLOT_EXT: &str = ".json";
/// Longest encoded id kept verbatim in a slot name. Leaves room for the
/// quarantine suffix under the usual 255-byte file name limit.
const MAX_ENCODED_LEN: usize = 180;
/// Encoded prefix kept in front of the digest for longer ids.
const DIGEST_PREFIX_LEN: usize = 120;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a user id to its slot file name.
    ///
    /// ASCII letters, digits and `-` pass through. Every other byte, `_`
    /// included, becomes `_XX` (uppercase hex), so distinct ids never share a
    /// slot and no id can escape the data directory.
    ///
    /// Encodings longer than `MAX_ENCODED_LEN` keep a prefix and append `~`
    /// plus a name-based UUID of the full id. `~` never appears in a plain
    /// encoding, so long and short ids cannot collide.
    pub fn slot_file_name(user: &UserId) -> String {
        let raw = user.as_str();
        let mut encoded = String::with_capacity(raw.len());
        for byte in raw.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                encoded.push(byte as char);
            } else {
                encoded.push_str(&format!("_{:02X}", byte));
            }
        }

        if encoded.len() > MAX_ENCODED_LEN {
            let digest = Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes());
            encoded.truncate(DIGEST_PREFIX_LEN);
            encoded.push('~');
            encoded.push_str(&digest.simple().to_string());
        }

        format!("{}{}{}", SLOT_PREFIX, encoded, SLOT_EXT)
    }

    pub fn slot_path(&self, user: &UserId) -> PathBuf {
        self.root.join(Self::slot_file_name(user))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TodoError::Io)?;
        }
        Ok(())
    }

    fn write_tmp(path: &Path, content: &str) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, user: &UserId) -> Result<Option<Snapshot>> {
        let path = self.slot_path(user);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(TodoError::Io(e)),
        };

        // Invalid UTF-8 is a parse failure here, not an I/O one
        let snapshot = serde_json::from_slice(&bytes).map_err(|e| TodoError::CorruptSnapshot {
            user: user.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(snapshot))
    }

    fn write(&self, user: &UserId, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir()?;

        let target = self.slot_path(user);
        let content = serde_json::to_string_pretty(snapshot).map_err(TodoError::Serialization)?;

        // Atomic write: same directory, so the rename never crosses filesystems
        let tmp = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        if let Err(e) = Self::write_tmp(&tmp, &content).and_then(|_| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            return Err(TodoError::Io(e));
        }

        Ok(())
    }

    fn quarantine(&self, user: &UserId) -> Result<Option<PathBuf>> {
        let path = self.slot_path(user);
        if !path.exists() {
            return Ok(None);
        }

        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let aside = self
            .root
            .join(format!("{}.corrupt-{}", Self::slot_file_name(user), stamp));
        fs::rename(&path, &aside).map_err(TodoError::Io)?;
        Ok(Some(aside))
    }
}
