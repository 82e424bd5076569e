//! The PATHCONF procedure (procedure 20), RFC 1813 section 3.3.20.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{fs, nfsstat3, NFSProgram};

/// PATHCONF retrieves the POSIX pathconf information for a file or directory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pathconf;

impl Procedure for Pathconf {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_PATHCONF;
    const NAME: &'static str = "PATHCONF";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = fs::PATHCONF3args;
    type Res = fs::PATHCONF3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.pathconf(context, args)
    }
}

pub type PathconfCall = NfsCall<Pathconf>;
pub type PathconfReply = NfsReply<Pathconf>;
