//! Shared behaviour of every RPC message this crate encodes or decodes.
//!
//! A message is an [`rpc_msg`](xdr::rpc::rpc_msg) header followed by a
//! procedure specific payload. [`RpcMessage`] gives each concrete message
//! type the same three operations: its transaction id, `encode` into a
//! complete record-marked TCP record and `decode` from one.

use std::io::{Cursor, Read, Write};

use tracing::{error, trace};

use super::wire::{self, WireConfig};
use crate::error::Error;
use crate::protocol::xdr::{self, deserialize, Serialize};

pub trait RpcMessage: Sized {
    /// Transaction id. A reply carries the id of the call it answers.
    fn xid(&self) -> u32;

    /// RPC header written in front of the payload.
    fn header(&self) -> xdr::rpc::rpc_msg;

    /// Exact number of payload bytes [`RpcMessage::write_payload`] produces.
    fn payload_size(&self) -> usize;

    fn write_payload<W: Write>(&self, dest: &mut W) -> std::io::Result<()>;

    /// Builds the message from an already decoded header and the rest
    /// of the record.
    fn read_payload<R: Read>(header: xdr::rpc::rpc_msg, src: &mut R) -> Result<Self, Error>;

    /// Checks the message may be sent. Runs before any byte is encoded.
    fn validate(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Encodes the message as a single-fragment TCP record.
    fn encode(&self) -> Result<Vec<u8>, Error> {
        write_head(self)
    }

    /// Decodes a message from a reassembled record payload, i.e. without
    /// record marking.
    fn decode_payload(payload: &[u8]) -> Result<Self, Error> {
        let mut src = Cursor::new(payload);
        let header = deserialize::<xdr::rpc::rpc_msg>(&mut src)?;
        let message = Self::read_payload(header, &mut src)?;
        let trailing = payload.len() as u64 - src.position();
        if trailing > 0 {
            trace!("ignoring {} trailing bytes of xid {}", trailing, message.xid());
        }
        Ok(message)
    }

    /// Decodes a message from one complete record-marked record.
    fn decode(record: &[u8]) -> Result<Self, Error> {
        Self::decode_payload(&wire::unframe(record, &WireConfig::default())?)
    }
}

/// Encodes `message` into a freshly allocated record.
///
/// The buffer is allocated once with the exact size computed from
/// [`Serialize::packed_size`]; writing a different number of bytes is
/// reported as [`Error::LengthMismatch`].
pub fn write_head<M: RpcMessage>(message: &M) -> Result<Vec<u8>, Error> {
    message.validate()?;

    let header = message.header();
    let length = header.packed_size() + message.payload_size();
    if length > wire::MAX_FRAGMENT_LENGTH {
        return Err(Error::RecordTooLarge { length, limit: wire::MAX_FRAGMENT_LENGTH });
    }

    let mut buffer = Vec::with_capacity(wire::RECORD_MARK_SIZE + length);
    wire::record_mark(length, true).serialize(&mut buffer).map_err(Error::Encode)?;
    header.serialize(&mut buffer).map_err(Error::Encode)?;
    message.write_payload(&mut buffer).map_err(Error::Encode)?;

    let actual = buffer.len() - wire::RECORD_MARK_SIZE;
    if actual != length {
        error!("xid {}: encoded {} bytes, precomputed {}", message.xid(), actual, length);
        return Err(Error::LengthMismatch { expected: length, actual });
    }
    trace!("xid {}: encoded record of {} bytes", message.xid(), length);
    Ok(buffer)
}

/// A bare header is a complete message for RPC level replies
/// (`PROG_UNAVAIL`, `RPC_MISMATCH` and the like), which carry no payload.
impl RpcMessage for xdr::rpc::rpc_msg {
    fn xid(&self) -> u32 {
        self.xid
    }

    fn header(&self) -> xdr::rpc::rpc_msg {
        self.clone()
    }

    fn payload_size(&self) -> usize {
        0
    }

    fn write_payload<W: Write>(&self, _dest: &mut W) -> std::io::Result<()> {
        Ok(())
    }

    fn read_payload<R: Read>(header: xdr::rpc::rpc_msg, _src: &mut R) -> Result<Self, Error> {
        Ok(header)
    }
}
