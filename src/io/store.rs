use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{NvStore, StorageError};
use crate::config::EEPROM_SIZE;

// Erased EEPROM cells read back as all ones.
const ERASED: u8 = 0xFF;

fn check_range(offset: usize, len: usize, size: usize) -> Result<usize, StorageError> {
    let end = offset.saturating_add(len);
    if end > size {
        return Err(StorageError::OutOfRange { offset, end, size });
    }
    Ok(end)
}

/// Byte image kept in memory; what a fresh chip looks like.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    bytes: Vec<u8>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            bytes: vec![ERASED; EEPROM_SIZE],
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NvStore for MemoryStore {
    fn read_bytes(&mut self, offset: usize, len: usize) -> Result<Vec<u8>, StorageError> {
        let end = check_range(offset, len, self.bytes.len())?;
        Ok(self.bytes[offset..end].to_vec())
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), StorageError> {
        let end = check_range(offset, bytes.len(), self.bytes.len())?;
        self.bytes[offset..end].copy_from_slice(bytes);
        Ok(())
    }
}

/// EEPROM image persisted to a file; every write is flushed through.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    image: MemoryStore,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let mut image = MemoryStore::new();
        match fs::read(&path) {
            Ok(data) => {
                let len = data.len().min(EEPROM_SIZE);
                image.bytes[..len].copy_from_slice(&data[..len]);
                log::debug!("loaded {len} store bytes from {}", path.display());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no store image at {}, starting erased", path.display());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Self { path, image })
    }
}

impl NvStore for FileStore {
    fn read_bytes(&mut self, offset: usize, len: usize) -> Result<Vec<u8>, StorageError> {
        self.image.read_bytes(offset, len)
    }

    fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<(), StorageError> {
        self.image.write_bytes(offset, bytes)?;
        fs::write(&self.path, self.image.bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_memory_reads_erased() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read_bytes(0, 4).unwrap(), vec![0xFF; 4]);
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.read_bytes(EEPROM_SIZE - 1, 2),
            Err(StorageError::OutOfRange { .. })
        ));
        assert!(store.write_bytes(EEPROM_SIZE, &[1]).is_err());
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = std::env::temp_dir()
            .join(format!("matrix-bomber-store-{}.bin", std::process::id()));
        let _ = fs::remove_file(&path);
        {
            let mut store = FileStore::open(&path).unwrap();
            store.write_bytes(3, &[7, 8, 9]).unwrap();
        }
        let mut reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.read_bytes(2, 5).unwrap(), vec![0xFF, 7, 8, 9, 0xFF]);
        let _ = fs::remove_file(&path);
    }
}
