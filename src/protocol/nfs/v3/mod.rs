//! NFSv3 (Network File System version 3) protocol implementation as specified in RFC 1813.
//!
//! This module describes all 22 procedures defined in the NFS version 3 protocol:
//!
//! 1. NULL - Do nothing (ping the server)
//! 2. GETATTR - Get file attributes
//! 3. SETATTR - Set file attributes
//! 4. LOOKUP - Look up file name
//! 5. ACCESS - Check access permission
//! 6. READLINK - Read from symbolic link
//! 7. READ - Read from file
//! 8. WRITE - Write to file
//! 9. CREATE - Create a file
//! 10. MKDIR - Create a directory
//! 11. SYMLINK - Create a symbolic link
//! 12. MKNOD - Create a special device
//! 13. REMOVE - Remove a file
//! 14. RMDIR - Remove a directory
//! 15. RENAME - Rename a file or directory
//! 16. LINK - Create a hard link
//! 17. READDIR - Read from directory
//! 18. READDIRPLUS - Extended read from directory
//! 19. FSSTAT - Get file system statistics
//! 20. FSINFO - Get file system information
//! 21. PATHCONF - Get path configuration
//! 22. COMMIT - Commit cached data
//!
//! Each procedure lives in its own module as a unit type implementing
//! [`Procedure`]: it names the argument and result bodies, the errors the
//! procedure may return and the [`NfsHandler`] method that serves it.
//! [`NfsCall`] and [`NfsReply`] wrap those bodies into complete RPC messages.
//! The main dispatcher function (`handle_nfs`) routes incoming calls by
//! procedure number.

use std::{fmt, io};

use futures::future::BoxFuture;
use tracing::warn;

use crate::error::{Error, HandlerResult};
use crate::handler::NfsHandler;
use crate::protocol::rpc::{self, RpcMessage};
use crate::protocol::xdr::nfs3::{nfsstat3, NFSProgram, ReplyStatus};
use crate::protocol::xdr::{self, Deserialize, Serialize};

mod access;
mod commit;
mod create;
mod fsinfo;
mod fsstat;
mod getattr;
mod link;
mod lookup;
mod message;
mod mkdir;
mod mknod;
mod null;
mod pathconf;
mod read;
mod readdir;
mod readdirplus;
mod readlink;
mod remove;
mod rename;
mod rmdir;
mod setattr;
mod symlink;
mod write;

pub use access::{Access, AccessCall, AccessReply};
pub use commit::{Commit, CommitCall, CommitReply};
pub use create::{Create, CreateCall, CreateReply};
pub use fsinfo::{Fsinfo, FsinfoCall, FsinfoReply};
pub use fsstat::{Fsstat, FsstatCall, FsstatReply};
pub use getattr::{Getattr, GetattrCall, GetattrReply};
pub use link::{Link, LinkCall, LinkReply};
pub use lookup::{Lookup, LookupCall, LookupReply};
pub use message::{NfsCall, NfsReply};
pub use mkdir::{Mkdir, MkdirCall, MkdirReply};
pub use mknod::{Mknod, MknodCall, MknodReply};
pub use null::{Null, NullCall, NullReply};
pub use pathconf::{Pathconf, PathconfCall, PathconfReply};
pub use read::{Read, ReadCall, ReadReply};
pub use readdir::{Readdir, ReaddirCall, ReaddirReply};
pub use readdirplus::{Readdirplus, ReaddirplusCall, ReaddirplusReply};
pub use readlink::{Readlink, ReadlinkCall, ReadlinkReply};
pub use remove::{Remove, RemoveCall, RemoveReply};
pub use rename::{Rename, RenameCall, RenameReply};
pub use rmdir::{Rmdir, RmdirCall, RmdirReply};
pub use setattr::{Setattr, SetattrCall, SetattrReply};
pub use symlink::{Symlink, SymlinkCall, SymlinkReply};
pub use write::{Write, WriteCall, WriteReply};

/// One NFS version 3 procedure.
///
/// Implemented by a unit type per procedure. The associated types are the
/// XDR bodies that follow the RPC header of the call and of the reply.
pub trait Procedure: Send + Sync + 'static {
    /// Procedure number.
    const PROCEDURE: NFSProgram;

    /// Upper case name used in logs, e.g. `READLINK`.
    const NAME: &'static str;

    /// Error statuses this procedure may return. `NFS3_OK` is always
    /// allowed and not listed.
    const ALLOWED_ERRORS: &'static [nfsstat3];

    type Args: Serialize + Deserialize + Default + fmt::Debug + Clone + PartialEq + Send;

    type Res: Serialize
        + Deserialize
        + Default
        + ReplyStatus
        + fmt::Debug
        + Clone
        + PartialEq
        + Send;

    /// Calls the [`NfsHandler`] method serving this procedure.
    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a rpc::Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>>;
}

/// Static description of a procedure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProcedureInfo {
    pub procedure: NFSProgram,
    pub name: &'static str,
    pub allowed_errors: &'static [nfsstat3],
}

impl ProcedureInfo {
    pub const fn of<P: Procedure>() -> ProcedureInfo {
        ProcedureInfo {
            procedure: P::PROCEDURE,
            name: P::NAME,
            allowed_errors: P::ALLOWED_ERRORS,
        }
    }

    /// True if a reply of this procedure may carry `status`.
    pub fn is_allowed(&self, status: nfsstat3) -> bool {
        status == nfsstat3::NFS3_OK || self.allowed_errors.contains(&status)
    }
}

/// All procedures, indexed by procedure number.
pub static PROCEDURES: [ProcedureInfo; 22] = [
    ProcedureInfo::of::<Null>(),
    ProcedureInfo::of::<Getattr>(),
    ProcedureInfo::of::<Setattr>(),
    ProcedureInfo::of::<Lookup>(),
    ProcedureInfo::of::<Access>(),
    ProcedureInfo::of::<Readlink>(),
    ProcedureInfo::of::<Read>(),
    ProcedureInfo::of::<Write>(),
    ProcedureInfo::of::<Create>(),
    ProcedureInfo::of::<Mkdir>(),
    ProcedureInfo::of::<Symlink>(),
    ProcedureInfo::of::<Mknod>(),
    ProcedureInfo::of::<Remove>(),
    ProcedureInfo::of::<Rmdir>(),
    ProcedureInfo::of::<Rename>(),
    ProcedureInfo::of::<Link>(),
    ProcedureInfo::of::<Readdir>(),
    ProcedureInfo::of::<Readdirplus>(),
    ProcedureInfo::of::<Fsstat>(),
    ProcedureInfo::of::<Fsinfo>(),
    ProcedureInfo::of::<Pathconf>(),
    ProcedureInfo::of::<Commit>(),
];

/// Looks up a procedure by number.
pub fn procedure_info(procedure: u32) -> Option<&'static ProcedureInfo> {
    PROCEDURES.get(usize::try_from(procedure).ok()?)
}

/// Checks `status` against the allowed errors of `P`.
pub fn validate_status<P: Procedure>(status: nfsstat3) -> Result<(), Error> {
    if ProcedureInfo::of::<P>().is_allowed(status) {
        Ok(())
    } else {
        Err(Error::DisallowedStatus { procedure: P::NAME, status })
    }
}

/// Checks that `result` can be sent as a reply of `P`: its status is
/// allowed and a failure body never comes with `NFS3_OK`.
pub fn validate_result<P: Procedure>(result: &P::Res) -> Result<(), Error> {
    let status = result.status();
    if result.is_failure() && status == nfsstat3::NFS3_OK {
        return Err(Error::DisallowedStatus { procedure: P::NAME, status });
    }
    validate_status::<P>(status)
}

/// Main handler for NFSv3 protocol
///
/// Dispatches an NFSv3 call whose RPC header has already been checked to
/// the procedure [`PROCEDURES`] lists under `procedure`. `args` is positioned at the
/// first byte of the procedure arguments. Unknown procedure numbers are
/// answered with `PROC_UNAVAIL`.
pub async fn handle_nfs<H, R>(
    handler: &H,
    xid: u32,
    procedure: u32,
    args: &mut R,
    context: &rpc::Context,
) -> Result<Vec<u8>, Error>
where
    H: NfsHandler + ?Sized,
    R: io::Read + Send,
{
    let Some(info) = procedure_info(procedure) else {
        warn!("Unknown NFS procedure number {}", procedure);
        return xdr::rpc::proc_unavail_reply_message(xid).encode();
    };

    use rpc::dispatch_procedure as dispatch;
    match info.procedure {
        NFSProgram::NFSPROC3_NULL => dispatch::<Null, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_GETATTR => {
            dispatch::<Getattr, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_SETATTR => {
            dispatch::<Setattr, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_LOOKUP => dispatch::<Lookup, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_ACCESS => dispatch::<Access, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_READLINK => {
            dispatch::<Readlink, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_READ => dispatch::<Read, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_WRITE => dispatch::<Write, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_CREATE => dispatch::<Create, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_MKDIR => dispatch::<Mkdir, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_SYMLINK => {
            dispatch::<Symlink, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_MKNOD => dispatch::<Mknod, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_REMOVE => dispatch::<Remove, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_RMDIR => dispatch::<Rmdir, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_RENAME => dispatch::<Rename, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_LINK => dispatch::<Link, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_READDIR => {
            dispatch::<Readdir, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_READDIRPLUS => {
            dispatch::<Readdirplus, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_FSSTAT => dispatch::<Fsstat, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_FSINFO => dispatch::<Fsinfo, _, _>(handler, xid, args, context).await,
        NFSProgram::NFSPROC3_PATHCONF => {
            dispatch::<Pathconf, _, _>(handler, xid, args, context).await
        }
        NFSProgram::NFSPROC3_COMMIT => dispatch::<Commit, _, _>(handler, xid, args, context).await,
    }
}
