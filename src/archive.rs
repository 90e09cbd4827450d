// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A file backed, dictionary like store of labeled arrays.
//!
//! An archive file is a sequence of records, each one of
//!
//! ```text
//! [tag u8][key length u32][key][payload length u64][payload]
//! ```
//!
//! with integers in little endian. A *put* record (tag 1) carries the
//! bincode encoding of a small header (element kind, element size and
//! shape) followed by
//! the array itself; a *delete* record (tag 2) has an empty payload. The
//! last record for a key wins. Deleting only appends, so the space of old
//! records is reclaimed by [`Archive::compact`].
//!
//! ```
//! use larry::archive::Archive;
//! use larry::prelude::*;
//!
//! let path = std::env::temp_dir().join(format!("larry-doc-{}.lar", std::process::id()));
//! # let _ = std::fs::remove_file(&path);
//! let mut archive = Archive::open(&path).unwrap();
//! let lar = Larry::from_vec(vec![1., 2.], labels![["a", "b"]]).unwrap();
//! archive.insert("prices", &lar).unwrap();
//! assert_eq!(archive.get::<f64>("prices").unwrap(), lar);
//! archive.remove("prices").unwrap();
//! assert!(!archive.contains("prices"));
//! # std::fs::remove_file(&path).unwrap();
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::mem;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bincode::config;
use bincode::error::{DecodeError, EncodeError};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Element, Kind, Larry};

const TAG_PUT: u8 = 1;
const TAG_DELETE: u8 = 2;
/// Bytes of a record before its key.
const KEY_OFFSET: u64 = 1 + 4;

/// An error of an [`Archive`] operation.
#[derive(Debug)]
pub enum ArchiveError
{
    Io(io::Error),
    Encode(EncodeError),
    Decode(DecodeError),
    KeyNotFound(String),
    /// The stored array holds elements of another kind than requested.
    KindMismatch
    {
        key: String,
        stored: Kind,
        requested: Kind,
    },
    /// The stored elements are of the requested kind but of another size,
    /// such as `f64` data read as `f32`.
    WidthMismatch
    {
        key: String,
        stored: usize,
        requested: usize,
    },
    /// Decoding the stored array left part of its payload unread.
    TrailingBytes
    {
        key: String,
        unread: usize,
    },
    /// Keys must be nonempty and shorter than `u32::MAX` bytes.
    InvalidKey(String),
}

impl fmt::Display for ArchiveError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            ArchiveError::Io(e) => write!(f, "archive I/O error: {}", e),
            ArchiveError::Encode(e) => write!(f, "could not encode array: {}", e),
            ArchiveError::Decode(e) => write!(f, "could not decode array: {}", e),
            ArchiveError::KeyNotFound(key) => write!(f, "key `{}` not in archive", key),
            ArchiveError::KindMismatch { key, stored, requested } => write!(
                f,
                "key `{}` holds {} elements, not {}",
                key, stored, requested
            ),
            ArchiveError::WidthMismatch { key, stored, requested } => write!(
                f,
                "key `{}` holds elements of {} bytes, not {}",
                key, stored, requested
            ),
            ArchiveError::TrailingBytes { key, unread } => {
                write!(f, "key `{}` left {} payload bytes undecoded", key, unread)
            }
            ArchiveError::InvalidKey(key) => write!(f, "invalid archive key `{}`", key),
        }
    }
}

impl Error for ArchiveError
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        match self {
            ArchiveError::Io(e) => Some(e),
            ArchiveError::Encode(e) => Some(e),
            ArchiveError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchiveError
{
    fn from(e: io::Error) -> Self
    {
        ArchiveError::Io(e)
    }
}

impl From<EncodeError> for ArchiveError
{
    fn from(e: EncodeError) -> Self
    {
        ArchiveError::Encode(e)
    }
}

impl From<DecodeError> for ArchiveError
{
    fn from(e: DecodeError) -> Self
    {
        ArchiveError::Decode(e)
    }
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Header
{
    kind: Kind,
    /// `size_of` the element type.
    width: usize,
    shape: Vec<usize>,
}

/// Location of the live payload of a key.
#[derive(Clone, Debug)]
struct Entry
{
    offset: u64,
    len: u64,
    header: Header,
}

/// Options and flags to configure how an archive is opened, in the manner
/// of [`std::fs::OpenOptions`].
#[derive(Clone, Debug)]
pub struct ArchiveOptions
{
    create: bool,
    sync: bool,
}

impl Default for ArchiveOptions
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl ArchiveOptions
{
    /// Options that create a missing file and do not sync after writes.
    pub fn new() -> Self
    {
        ArchiveOptions { create: true, sync: false }
    }

    /// Create the archive file if it does not exist.
    pub fn create(&mut self, create: bool) -> &mut Self
    {
        self.create = create;
        self
    }

    /// Flush every write to disk before returning.
    pub fn sync(&mut self, sync: bool) -> &mut Self
    {
        self.sync = sync;
        self
    }

    /// Open the archive at `path`, scanning its records.
    ///
    /// A truncated record at the end of the file, left by an interrupted
    /// write, is logged and cut off.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> ArchiveResult<Archive>
    {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(self.create)
            .open(&path)?;
        let index = scan(&file, &path)?;
        info!("opened archive {} with {} keys", path.display(), index.len());
        Ok(Archive {
            path,
            file,
            index,
            sync: self.sync,
        })
    }
}

/// A dictionary like, file backed store of labeled arrays.
///
/// Keys are strings; every key holds one [`Larry`] of any element type.
#[derive(Debug)]
pub struct Archive
{
    path: PathBuf,
    file: File,
    index: BTreeMap<String, Entry>,
    sync: bool,
}

fn truncated() -> io::Error
{
    io::Error::new(io::ErrorKind::UnexpectedEof, "truncated record")
}

fn read_u32<R: Read>(r: &mut R) -> io::Result<u32>
{
    let mut buf = [0; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64<R: Read>(r: &mut R) -> io::Result<u64>
{
    let mut buf = [0; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read the record starting at `offset`, returning its tag, key, payload
/// location and the position of the next record.
fn read_record<R: Read>(r: &mut R, offset: u64, end: u64) -> io::Result<(u8, String, u64, Vec<u8>, u64)>
{
    let mut tag = [0; 1];
    r.read_exact(&mut tag)?;
    let key_len = u64::from(read_u32(r)?);
    if offset + KEY_OFFSET + key_len + 8 > end {
        return Err(truncated());
    }
    let mut key = vec![0; key_len as usize];
    r.read_exact(&mut key)?;
    let payload_len = read_u64(r)?;
    let payload_offset = offset + KEY_OFFSET + key_len + 8;
    if payload_offset + payload_len > end {
        return Err(truncated());
    }
    let mut payload = vec![0; payload_len as usize];
    r.read_exact(&mut payload)?;
    let key = String::from_utf8(key).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if tag[0] != TAG_PUT && tag[0] != TAG_DELETE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unknown record tag {} at offset {}", tag[0], offset),
        ));
    }
    Ok((tag[0], key, payload_offset, payload, payload_offset + payload_len))
}

fn scan(file: &File, path: &Path) -> ArchiveResult<BTreeMap<String, Entry>>
{
    let end = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    let mut index = BTreeMap::new();
    let mut offset = 0;
    while offset < end {
        match read_record(&mut reader, offset, end) {
            Ok((TAG_PUT, key, payload_offset, payload, next)) => {
                let (header, _) = bincode::serde::decode_from_slice::<Header, _>(&payload, config::standard())?;
                index.insert(
                    key,
                    Entry {
                        offset: payload_offset,
                        len: next - payload_offset,
                        header,
                    },
                );
                offset = next;
            }
            Ok((_, key, _, _, next)) => {
                index.remove(&key);
                offset = next;
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                warn!(
                    "archive {}: truncated record at offset {}, dropping {} trailing bytes",
                    path.display(),
                    offset,
                    end - offset
                );
                file.set_len(offset)?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(index)
}

fn encode_record(tag: u8, key: &str, payload: &[u8]) -> Vec<u8>
{
    let mut buf = Vec::with_capacity(KEY_OFFSET as usize + key.len() + 8 + payload.len());
    buf.push(tag);
    buf.extend_from_slice(&(key.len() as u32).to_le_bytes());
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

fn check_key(key: &str) -> ArchiveResult<()>
{
    if key.is_empty() || key.len() >= u32::MAX as usize {
        return Err(ArchiveError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

impl Archive
{
    /// Open the archive at `path`, creating the file if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> ArchiveResult<Archive>
    {
        ArchiveOptions::new().open(path)
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// Append one record and return the offset of its payload.
    fn append(&mut self, tag: u8, key: &str, payload: &[u8]) -> ArchiveResult<u64>
    {
        let offset = self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(&encode_record(tag, key, payload))?;
        if self.sync {
            self.file.sync_data()?;
        }
        Ok(offset + KEY_OFFSET + key.len() as u64 + 8)
    }

    fn read_payload(&self, entry: &Entry) -> ArchiveResult<Vec<u8>>
    {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(entry.offset))?;
        let mut payload = vec![0; entry.len as usize];
        file.read_exact(&mut payload)?;
        Ok(payload)
    }

    /// Store `lar` under `key`, replacing any array stored there before.
    ///
    /// **Errors** with `InvalidKey` if `key` is empty or too long.
    pub fn insert<A>(&mut self, key: &str, lar: &Larry<A>) -> ArchiveResult<()>
    where A: Element + Serialize
    {
        check_key(key)?;
        let header = Header {
            kind: A::KIND,
            width: mem::size_of::<A>(),
            shape: lar.shape().to_vec(),
        };
        let mut payload = bincode::serde::encode_to_vec(&header, config::standard())?;
        payload.extend(bincode::serde::encode_to_vec(lar, config::standard())?);
        let offset = self.append(TAG_PUT, key, &payload)?;
        debug!(
            "archive {}: put `{}` ({} {:?}, {} bytes)",
            self.path.display(),
            key,
            header.kind,
            header.shape,
            payload.len()
        );
        self.index.insert(
            key.to_owned(),
            Entry {
                offset,
                len: payload.len() as u64,
                header,
            },
        );
        Ok(())
    }

    /// Load the array stored under `key`.
    ///
    /// The labels are checked again while decoding, so a damaged record is
    /// reported rather than producing an invalid array.
    ///
    /// **Errors** with `KeyNotFound` if there is no such key, with
    /// `KindMismatch` or `WidthMismatch` if the stored elements are not of
    /// the kind or size of `A`, and with `TrailingBytes` if the decoded
    /// array does not use the whole record.
    pub fn get<A>(&self, key: &str) -> ArchiveResult<Larry<A>>
    where A: Element + DeserializeOwned
    {
        let entry = self
            .index
            .get(key)
            .ok_or_else(|| ArchiveError::KeyNotFound(key.to_owned()))?;
        if entry.header.kind != A::KIND {
            return Err(ArchiveError::KindMismatch {
                key: key.to_owned(),
                stored: entry.header.kind,
                requested: A::KIND,
            });
        }
        if entry.header.width != mem::size_of::<A>() {
            return Err(ArchiveError::WidthMismatch {
                key: key.to_owned(),
                stored: entry.header.width,
                requested: mem::size_of::<A>(),
            });
        }
        let payload = self.read_payload(entry)?;
        let (_, header_len) = bincode::serde::decode_from_slice::<Header, _>(&payload, config::standard())?;
        let body = &payload[header_len..];
        let (lar, used) = bincode::serde::decode_from_slice(body, config::standard())?;
        if used != body.len() {
            return Err(ArchiveError::TrailingBytes {
                key: key.to_owned(),
                unread: body.len() - used,
            });
        }
        Ok(lar)
    }

    pub fn contains(&self, key: &str) -> bool
    {
        self.index.contains_key(key)
    }

    /// The keys of the archive, in sorted order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_
    {
        self.index.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize
    {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.index.is_empty()
    }

    /// Delete `key`. The stored data stays in the file until the archive
    /// is compacted.
    ///
    /// **Errors** with `KeyNotFound` if there is no such key.
    pub fn remove(&mut self, key: &str) -> ArchiveResult<()>
    {
        if !self.index.contains_key(key) {
            return Err(ArchiveError::KeyNotFound(key.to_owned()));
        }
        self.append(TAG_DELETE, key, &[])?;
        self.index.remove(key);
        debug!("archive {}: delete `{}`", self.path.display(), key);
        Ok(())
    }

    /// Delete every key.
    pub fn clear(&mut self) -> ArchiveResult<()>
    {
        let keys: Vec<String> = self.index.keys().cloned().collect();
        for key in keys {
            self.remove(&key)?;
        }
        Ok(())
    }

    /// List `(key, kind, shape)` of every stored array without decoding
    /// any data.
    pub fn summary(&self) -> Vec<(String, Kind, Vec<usize>)>
    {
        self.index
            .iter()
            .map(|(key, entry)| (key.clone(), entry.header.kind, entry.header.shape.clone()))
            .collect()
    }

    /// Size of the archive file in bytes.
    pub fn file_len(&self) -> ArchiveResult<u64>
    {
        Ok(self.file.metadata()?.len())
    }

    /// Rewrite the archive with only the live records, reclaiming the
    /// space of deleted and replaced arrays.
    ///
    /// The new file is written next to the old one and renamed over it.
    pub fn compact(&mut self) -> ArchiveResult<()>
    {
        let before = self.file_len()?;
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".compact");
        let tmp_path = PathBuf::from(tmp_name);

        let mut index = BTreeMap::new();
        {
            let mut out = BufWriter::new(File::create(&tmp_path)?);
            let mut offset = 0;
            for (key, entry) in &self.index {
                let payload = self.read_payload(entry)?;
                let record = encode_record(TAG_PUT, key, &payload);
                out.write_all(&record)?;
                let mut moved = entry.clone();
                moved.offset = offset + KEY_OFFSET + key.len() as u64 + 8;
                index.insert(key.clone(), moved);
                offset += record.len() as u64;
            }
            let file = out.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        self.file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        self.index = index;
        info!(
            "compacted archive {}: {} -> {} bytes",
            self.path.display(),
            before,
            self.file_len()?
        );
        Ok(())
    }
}
