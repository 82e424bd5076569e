//! NFS Mamont Proto - the NFS version 3 protocol core of a Network File System server in Rust
//!
//! This library implements the wire side of NFS version 3 as defined in RFC 1813:
//! decoding calls, handing them to a file system backend and encoding replies.
//! Serving storage is left to the backend, listening for connections to the
//! embedding server.
//!
//! ## Supported Features
//!
//! - XDR encoding and decoding of every NFSv3 argument and result body
//! - All 22 NFSv3 procedures, each with its RFC 1813 list of allowed errors
//! - RPC record marking over TCP, including multi-fragment records
//! - RPC level rejections (version, program and procedure mismatches, garbage arguments)
//! - Concurrent dispatch of the calls on one connection with Tokio
//!
//! ## Main Components
//!
//! - `handler`: The [`NfsHandler`] trait a file system backend implements. It receives
//!   decoded arguments and returns typed results.
//!
//! - `protocol`: XDR types, RPC framing and dispatch, and the NFSv3 procedure table.
//!
//! - `fs_util`: Conversion of backend file metadata into NFS attributes.
//!
//! - `error`: Errors of the protocol layer and of handlers.
//!
//! ## Standards Compliance
//!
//! This implementation follows these RFCs:
//! - RFC 1813: NFS Version 3 Protocol Specification
//! - RFC 5531: RPC: Remote Procedure Call Protocol Specification Version 2 (obsoletes RFC 1831)
//! - RFC 1832: XDR: External Data Representation Standard (obsoletes RFC 1014)
//!
//! ## Usage
//!
//! Implement [`NfsHandler`], wrap it in a [`Dispatcher`] and pass every accepted
//! connection to [`serve_connection`](protocol::rpc::serve_connection).

pub mod error;
pub mod fs_util;
pub mod handler;
pub mod protocol;

pub use error::{Error, HandlerError, HandlerResult};
pub use handler::NfsHandler;
pub use protocol::rpc::{Context, Dispatcher};
pub use protocol::xdr;
