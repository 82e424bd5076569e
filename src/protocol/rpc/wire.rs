//! RPC message framing and transmission as specified in RFC 5531 (previously RFC 1057 section 10).
//!
//! This module implements the Record Marking Standard for sending RPC messages
//! over TCP connections. Every fragment is prefixed with a 4-byte big-endian
//! header: the lower 31 bits hold the fragment length, the highest bit marks
//! the last fragment of a record.
//!
//! It provides:
//! - [`RecordAssembler`], which reassembles records from arbitrary chunks
//! - [`unframe`] for a single complete record held in memory
//! - [`read_record`] for an async byte stream
//! - [`serve_connection`], which drives one connection end to end

use std::sync::Arc;

use byteorder::{BigEndian, ByteOrder};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, trace};

use super::{Context, Dispatcher};
use crate::error::Error;
use crate::handler::NfsHandler;

/// Size of the record marking header preceding every fragment.
pub const RECORD_MARK_SIZE: usize = 4;

/// Highest bit of the record mark: this fragment ends the record.
pub const LAST_FRAGMENT: u32 = 1 << 31;

/// Maximum fragment size is 2^31 - 1 bytes
pub const MAX_FRAGMENT_LENGTH: usize = (1 << 31) - 1;

/// Default upper bound of a reassembled record.
pub const MAX_RPC_RECORD_LENGTH: usize = 4 * 1024 * 1024;

/// Size of the socket read buffer
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Limits applied while reading records.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WireConfig {
    /// Largest accepted record, summed over all of its fragments
    pub max_record_length: usize,
}

impl Default for WireConfig {
    fn default() -> WireConfig {
        WireConfig { max_record_length: MAX_RPC_RECORD_LENGTH }
    }
}

/// Record mark for a fragment of `length` bytes.
pub fn record_mark(length: usize, is_last: bool) -> u32 {
    let length = (length & MAX_FRAGMENT_LENGTH) as u32;
    if is_last {
        length | LAST_FRAGMENT
    } else {
        length
    }
}

/// Splits a record mark into the fragment length and the last-fragment flag.
pub fn parse_record_mark(mark: u32) -> (usize, bool) {
    ((mark & !LAST_FRAGMENT) as usize, mark & LAST_FRAGMENT != 0)
}

/// Fails if a fragment of `length` bytes would grow a record already holding
/// `received` bytes past the configured limit.
fn check_record_length(received: usize, length: usize, config: &WireConfig) -> Result<(), Error> {
    let total = received.saturating_add(length);
    if total > config.max_record_length {
        return Err(Error::RecordTooLarge { length: total, limit: config.max_record_length });
    }
    Ok(())
}

/// Reassembles records from a byte stream delivered in arbitrary chunks.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    config: WireConfig,
    /// Received bytes not yet consumed
    pending: Vec<u8>,
    /// Fragments of the current record collected so far
    record: Vec<u8>,
}

impl RecordAssembler {
    pub fn new(config: WireConfig) -> RecordAssembler {
        RecordAssembler { config, pending: Vec::new(), record: Vec::new() }
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Returns the next complete record payload, without record marking,
    /// or `None` if more bytes are needed.
    pub fn next_record(&mut self) -> Result<Option<Vec<u8>>, Error> {
        loop {
            if self.pending.len() < RECORD_MARK_SIZE {
                return Ok(None);
            }
            let (length, is_last) = parse_record_mark(BigEndian::read_u32(&self.pending));
            check_record_length(self.record.len(), length, &self.config)?;
            let fragment_end = RECORD_MARK_SIZE + length;
            if self.pending.len() < fragment_end {
                return Ok(None);
            }
            trace!("Reading fragment length:{}, last:{}", length, is_last);
            self.record.extend_from_slice(&self.pending[RECORD_MARK_SIZE..fragment_end]);
            self.pending.drain(..fragment_end);
            if is_last {
                return Ok(Some(std::mem::take(&mut self.record)));
            }
        }
    }

    /// True if bytes of an unfinished record are buffered.
    pub fn has_partial(&self) -> bool {
        !self.pending.is_empty() || !self.record.is_empty()
    }
}

/// Strips record marking from exactly one complete record.
pub fn unframe(record: &[u8], config: &WireConfig) -> Result<Vec<u8>, Error> {
    let mut assembler = RecordAssembler::new(*config);
    assembler.push(record);
    match assembler.next_record()? {
        Some(payload) if !assembler.has_partial() => Ok(payload),
        Some(_) => Err(Error::Framing("bytes follow the last fragment".to_string())),
        None => Err(Error::Framing("record is truncated".to_string())),
    }
}

/// Reads exactly one record from `src`, consuming no byte past its last
/// fragment.
///
/// Meant for a caller that owns the stream and waits for one message at a
/// time, e.g. a client reading replies. [`serve_connection`] reads in
/// chunks through a [`RecordAssembler`] instead, since it must keep
/// writing replies while waiting for input.
///
/// Returns `None` when the stream ends before a new record starts. A stream
/// ending inside a record is a [`Error::Framing`] error.
pub async fn read_record<R>(src: &mut R, config: &WireConfig) -> Result<Option<Vec<u8>>, Error>
where
    R: AsyncRead + Unpin,
{
    let mut record = Vec::new();
    loop {
        let mut header_buf = [0_u8; RECORD_MARK_SIZE];
        match src.read_exact(&mut header_buf).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof && record.is_empty() => {
                return Ok(None);
            }
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(Error::Framing("stream ended between fragments".to_string()));
            }
            Err(e) => return Err(Error::Io(e)),
        }
        let (length, is_last) = parse_record_mark(u32::from_be_bytes(header_buf));
        check_record_length(record.len(), length, config)?;
        trace!("Reading fragment length:{}, last:{}", length, is_last);
        let received = (&mut *src)
            .take(length as u64)
            .read_to_end(&mut record)
            .await
            .map_err(Error::Io)?;
        if received != length {
            return Err(Error::Framing(format!(
                "fragment truncated after {received} of {length} bytes"
            )));
        }
        if is_last {
            return Ok(Some(record));
        }
    }
}

/// Serves RPC calls arriving on `stream` until the peer closes it.
///
/// Every complete record is dispatched on its own task, so calls run
/// concurrently and replies are written in completion order, each as one
/// whole record. Replies always carry the xid of their call. Calls still
/// running when the peer stops sending are awaited and answered.
///
/// Dropping the returned future aborts every outstanding call; nothing is
/// written for them. A truncated record at the end of the stream is
/// discarded without reaching the handler.
pub async fn serve_connection<S, H>(
    stream: S,
    dispatcher: Arc<Dispatcher<H>>,
    context: Context,
    config: WireConfig,
) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite,
    H: NfsHandler + ?Sized + 'static,
{
    let (mut reader, mut writer) = tokio::io::split(stream);
    let (reply_sender, mut replies) = mpsc::unbounded_channel::<Vec<u8>>();
    let mut reply_sender = Some(reply_sender);
    let mut assembler = RecordAssembler::new(config);
    let mut calls = JoinSet::new();
    let mut chunk = vec![0_u8; READ_CHUNK_SIZE];

    loop {
        tokio::select! {
            read = reader.read(&mut chunk), if reply_sender.is_some() => {
                let read = read.map_err(Error::Io)?;
                if read == 0 {
                    if assembler.has_partial() {
                        debug!("{}: discarding truncated record", context.client_addr);
                    }
                    reply_sender = None;
                    continue;
                }
                assembler.push(&chunk[..read]);
                while let Some(record) = assembler.next_record()? {
                    let Some(sender) = reply_sender.clone() else { break };
                    let dispatcher = dispatcher.clone();
                    let context = context.clone();
                    calls.spawn(async move {
                        match dispatcher.dispatch(&record, &context).await {
                            Ok(reply) => {
                                let _ = sender.send(reply);
                            }
                            Err(e) => error!("{}: dropping call: {}", context.client_addr, e),
                        }
                    });
                }
            }
            Some(joined) = calls.join_next(), if !calls.is_empty() => {
                if let Err(e) = joined {
                    error!("{}: call task failed: {}", context.client_addr, e);
                }
            }
            Some(reply) = replies.recv() => {
                trace!("Writing record length:{}", reply.len());
                writer.write_all(&reply).await.map_err(Error::Io)?;
                writer.flush().await.map_err(Error::Io)?;
            }
            else => break,
        }
    }

    debug!("{}: connection closed", context.client_addr);
    Ok(())
}
