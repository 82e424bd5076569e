//! Handler module defines the interface between the protocol layer and a
//! file system backend.
//!
//! The dispatcher decodes every call, hands the typed arguments to the
//! matching [`NfsHandler`] method and encodes whatever result comes back.
//! A backend implements the procedures it supports; everything else keeps
//! the default body and is answered with an RPC `PROC_UNAVAIL` reply.
//!
//! Results are the protocol's own `XXX3res` values. A failure the client
//! should see is an error status inside the result, for example
//! `Nfs3Result::Err((nfsstat3::NFS3ERR_NOENT, LOOKUP3resfail::default()))`.
//! [`HandlerError`] is reserved for failures that have no status of their own.
//!
//! Attribute slots of a result are filled from a [`FileStat`](crate::fs_util::FileStat)
//! with the `with_*` builders, e.g.
//!
//! ```ignore
//! let resok = READLINK3resok { data: target, ..Default::default() }.with_attributes(&stat);
//! ```

use async_trait::async_trait;

use crate::error::{HandlerError, HandlerResult};
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{self, dir, file, fs};

/// Backend for the NFS version 3 procedures.
///
/// Calls on one connection may run concurrently, so implementations must
/// be safe to share between tasks.
#[async_trait]
pub trait NfsHandler: Send + Sync {
    /// NULL. Succeeds unless overridden.
    async fn null(&self, _context: &Context) -> HandlerResult<()> {
        Ok(())
    }

    /// GETATTR: attributes of a file system object.
    async fn getattr(
        &self,
        _context: &Context,
        _args: nfs3::GETATTR3args,
    ) -> HandlerResult<nfs3::GETATTR3res> {
        Err(HandlerError::Unimplemented)
    }

    /// SETATTR: changes attributes, optionally guarded by the object's ctime.
    async fn setattr(
        &self,
        _context: &Context,
        _args: nfs3::SETATTR3args,
    ) -> HandlerResult<nfs3::SETATTR3res> {
        Err(HandlerError::Unimplemented)
    }

    /// LOOKUP: resolves one name inside a directory.
    async fn lookup(
        &self,
        _context: &Context,
        _args: dir::LOOKUP3args,
    ) -> HandlerResult<dir::LOOKUP3res> {
        Err(HandlerError::Unimplemented)
    }

    /// ACCESS: which of the requested permissions the caller holds.
    async fn access(
        &self,
        _context: &Context,
        _args: nfs3::ACCESS3args,
    ) -> HandlerResult<nfs3::ACCESS3res> {
        Err(HandlerError::Unimplemented)
    }

    /// READLINK: target of a symbolic link.
    async fn readlink(
        &self,
        _context: &Context,
        _args: file::READLINK3args,
    ) -> HandlerResult<file::READLINK3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn read(
        &self,
        _context: &Context,
        _args: file::READ3args,
    ) -> HandlerResult<file::READ3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn write(
        &self,
        _context: &Context,
        _args: file::WRITE3args,
    ) -> HandlerResult<file::WRITE3res> {
        Err(HandlerError::Unimplemented)
    }

    /// CREATE: regular file, in unchecked, guarded or exclusive mode.
    async fn create(
        &self,
        _context: &Context,
        _args: dir::CREATE3args,
    ) -> HandlerResult<dir::CREATE3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn mkdir(
        &self,
        _context: &Context,
        _args: dir::MKDIR3args,
    ) -> HandlerResult<dir::MKDIR3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn symlink(
        &self,
        _context: &Context,
        _args: dir::SYMLINK3args,
    ) -> HandlerResult<dir::SYMLINK3res> {
        Err(HandlerError::Unimplemented)
    }

    /// MKNOD: device, socket or FIFO.
    async fn mknod(
        &self,
        _context: &Context,
        _args: dir::MKNOD3args,
    ) -> HandlerResult<dir::MKNOD3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn remove(
        &self,
        _context: &Context,
        _args: dir::REMOVE3args,
    ) -> HandlerResult<dir::REMOVE3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn rmdir(
        &self,
        _context: &Context,
        _args: dir::RMDIR3args,
    ) -> HandlerResult<dir::RMDIR3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn rename(
        &self,
        _context: &Context,
        _args: dir::RENAME3args,
    ) -> HandlerResult<dir::RENAME3res> {
        Err(HandlerError::Unimplemented)
    }

    /// LINK: hard link to an existing file.
    async fn link(
        &self,
        _context: &Context,
        _args: file::LINK3args,
    ) -> HandlerResult<file::LINK3res> {
        Err(HandlerError::Unimplemented)
    }

    /// READDIR: a page of names starting after `cookie`.
    async fn readdir(
        &self,
        _context: &Context,
        _args: dir::READDIR3args,
    ) -> HandlerResult<dir::READDIR3res> {
        Err(HandlerError::Unimplemented)
    }

    /// READDIRPLUS: like READDIR, with attributes and handles per entry.
    async fn readdirplus(
        &self,
        _context: &Context,
        _args: dir::READDIRPLUS3args,
    ) -> HandlerResult<dir::READDIRPLUS3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn fsstat(
        &self,
        _context: &Context,
        _args: fs::FSSTAT3args,
    ) -> HandlerResult<fs::FSSTAT3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn fsinfo(
        &self,
        _context: &Context,
        _args: fs::FSINFO3args,
    ) -> HandlerResult<fs::FSINFO3res> {
        Err(HandlerError::Unimplemented)
    }

    async fn pathconf(
        &self,
        _context: &Context,
        _args: fs::PATHCONF3args,
    ) -> HandlerResult<fs::PATHCONF3res> {
        Err(HandlerError::Unimplemented)
    }

    /// COMMIT: flushes data written with an unstable WRITE.
    async fn commit(
        &self,
        _context: &Context,
        _args: file::COMMIT3args,
    ) -> HandlerResult<file::COMMIT3res> {
        Err(HandlerError::Unimplemented)
    }
}
