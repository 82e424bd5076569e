//! The `COMMIT` procedure (procedure 21), RFC 1813 section 3.3.21.
//!
//! `COMMIT` flushes data previously written with an `UNSTABLE` `WRITE` to
//! stable storage. The reply carries a write verifier the client compares
//! with the ones from earlier WRITEs to detect a server restart that lost
//! uncommitted data.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{file, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Commit;

impl Procedure for Commit {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_COMMIT;
    const NAME: &'static str = "COMMIT";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = file::COMMIT3args;
    type Res = file::COMMIT3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.commit(context, args)
    }
}

pub type CommitCall = NfsCall<Commit>;
pub type CommitReply = NfsReply<Commit>;
