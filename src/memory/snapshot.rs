//! Snapshot file
//!
//! ## File Format
//! ```text
//! ┌──────────┬─────────────┬──────────┬──────────────┬──────────────────┐
//! │Magic (4) │ Version (2) │ CRC (4)  │ Body len (8) │ Body (bincode)   │
//! └──────────┴─────────────┴──────────┴──────────────┴──────────────────┘
//! ```
//! All integers little-endian. The CRC covers the body only.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{KvqError, Result};

use super::store::StoreState;

/// File magic
pub const MAGIC: &[u8; 4] = b"KVQS";

/// Format version
pub const VERSION: u16 = 1;

/// Magic + version + crc + body length
pub const HEADER_SIZE: usize = 4 + 2 + 4 + 8;

/// Serialize `state` and replace `path` with it
///
/// Writes to a sibling temp file first so a crash never leaves a torn
/// snapshot in place.
pub(crate) fn write(path: &Path, state: &StoreState) -> Result<()> {
    let body = bincode::serialize(state)?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + body.len());
    buf.put_slice(MAGIC);
    buf.put_u16_le(VERSION);
    buf.put_u32_le(crc32fast::hash(&body));
    buf.put_u64_le(body.len() as u64);
    buf.put_slice(&body);

    let tmp_path = temp_path(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&buf)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// `<file name>.tmp` next to `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Read and verify a snapshot
pub(crate) fn read(path: &Path) -> Result<StoreState> {
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;

    if bytes.len() < HEADER_SIZE {
        return Err(KvqError::Snapshot(format!(
            "Incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let mut header = &bytes[..HEADER_SIZE];
    let mut magic = [0u8; 4];
    header.copy_to_slice(&mut magic);
    if &magic != MAGIC {
        return Err(KvqError::Snapshot("Bad magic".to_string()));
    }

    let version = header.get_u16_le();
    if version != VERSION {
        return Err(KvqError::Snapshot(format!(
            "Unsupported version: {} (expected {})",
            version, VERSION
        )));
    }

    let expected_crc = header.get_u32_le();
    let body_len = header.get_u64_le() as usize;

    let body = &bytes[HEADER_SIZE..];
    if body.len() != body_len {
        return Err(KvqError::Snapshot(format!(
            "Body length mismatch: header says {}, file has {}",
            body_len,
            body.len()
        )));
    }

    let actual_crc = crc32fast::hash(body);
    if actual_crc != expected_crc {
        return Err(KvqError::Snapshot(format!(
            "CRC mismatch: expected {:08x}, got {:08x}",
            expected_crc, actual_crc
        )));
    }

    Ok(bincode::deserialize(body)?)
}
