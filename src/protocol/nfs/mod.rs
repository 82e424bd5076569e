//! NFS protocol implementation module.
//!
//! - `v3`: The NFS version 3 protocol as specified in RFC 1813. Every one of
//!   its 22 procedures is described by a [`v3::Procedure`]: the argument and
//!   result bodies, the errors it may return and the handler method serving it.
//!
//! The MOUNT protocol, which hands out the root file handle, and PORTMAP are
//! served elsewhere; calls for them are rejected with `PROG_UNAVAIL`.

pub mod v3;
