//! Deterministic before/after texts for demo mode and harness rendering.

use crate::files::LoadedFile;
use std::path::PathBuf;

const DEMO_OLD: &str = "\
//! Frame codec.

pub struct FrameHeader {
    pub id: u32,
    pub length: u16,
}

pub fn decode(bytes: &[u8]) -> Option<FrameHeader> {
    let id = read_u32(bytes)?;
    let length = read_u16(&bytes[4..])?;
    Some(FrameHeader { id, length })
}

fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |acc, byte| acc ^ byte)
}
";

const DEMO_NEW: &str = "\
//! Frame codec.

pub struct FrameHeader {
    pub id: u64,
    pub length: u32,
    pub flags: u8,
}

pub fn decode(bytes: &[u8]) -> Result<FrameHeader, DecodeError> {
    let id = read_u64(bytes)?;
    let length = read_u32(&bytes[8..])?;
    let flags = bytes.get(12).copied().ok_or(DecodeError::Truncated)?;
    Ok(FrameHeader { id, length, flags })
}
";

/// Returns the demo "before" file.
pub fn demo_old_file() -> LoadedFile {
    LoadedFile {
        path: PathBuf::from("codec/frame.rs.orig"),
        text: DEMO_OLD.to_owned(),
    }
}

/// Returns the demo "after" file.
pub fn demo_new_file() -> LoadedFile {
    LoadedFile {
        path: PathBuf::from("codec/frame.rs"),
        text: DEMO_NEW.to_owned(),
    }
}
