//! Protocol module implements the NFS version 3 protocol core as specified in RFC 1813.
//!
//! This module contains three main components:
//!
//! - `xdr`: External Data Representation (XDR) for serialization and deserialization
//!   of data structures according to RFC 1832, including every NFSv3 argument and
//!   result body.
//!
//! - `rpc`: Remote Procedure Call (RPC) message framing, encoding and dispatch as
//!   defined in RFC 5531, from a byte stream down to a single handler call.
//!
//! - `nfs`: The NFS version 3 procedure table with the per-procedure call and
//!   reply message types and their allowed error statuses.

pub mod nfs;
pub mod rpc;
pub mod xdr;
