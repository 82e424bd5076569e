//! RPC (Remote Procedure Call) protocol implementation as specified in RFC 5531 (previously RFC 1057).
//!
//! The RPC protocol enables programs to call procedures on remote systems as if
//! they were local calls. NFS runs on top of it: every NFS request is an RPC
//! call and every answer an RPC reply carrying the same transaction id.
//!
//! This module implements RPC version 2 with the following features:
//!
//! 1. Message framing for TCP using the Record Marking Standard ([`wire`])
//! 2. Encoding and decoding of complete messages ([`RpcMessage`])
//! 3. Authentication credential parsing (AUTH_UNIX, never verified)
//! 4. Program, version and procedure number dispatching ([`Dispatcher`])
//! 5. RPC level rejections (RPC_MISMATCH, PROG_UNAVAIL, PROG_MISMATCH,
//!    PROC_UNAVAIL, GARBAGE_ARGS)
//! 6. Concurrent processing of the calls on one connection

mod context;
mod dispatcher;
mod message;
pub mod wire;

pub use context::Context;
pub use dispatcher::{DispatchStage, Dispatcher};
pub(crate) use dispatcher::dispatch_procedure;
pub use message::{write_head, RpcMessage};
pub use wire::{serve_connection, RecordAssembler, WireConfig};
