//! The ACCESS procedure (procedure 4), RFC 1813 section 3.3.4.
//!
//! ACCESS determines the access rights that a user, as identified by the
//! authentication credentials, has with respect to a file system object.
//! The request is a bit mask of `ACCESS3_*` permissions; the reply holds the
//! subset the caller actually has, so clients can cache permissions instead
//! of probing with real operations.

use futures::future::BoxFuture;

use super::{NfsCall, NfsReply, Procedure};
use crate::error::HandlerResult;
use crate::handler::NfsHandler;
use crate::protocol::rpc::Context;
use crate::protocol::xdr::nfs3::{self, nfsstat3, NFSProgram};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Access;

impl Procedure for Access {
    const PROCEDURE: NFSProgram = NFSProgram::NFSPROC3_ACCESS;
    const NAME: &'static str = "ACCESS";
    const ALLOWED_ERRORS: &'static [nfsstat3] = &[
        nfsstat3::NFS3ERR_IO,
        nfsstat3::NFS3ERR_STALE,
        nfsstat3::NFS3ERR_BADHANDLE,
        nfsstat3::NFS3ERR_SERVERFAULT,
    ];

    type Args = nfs3::ACCESS3args;
    type Res = nfs3::ACCESS3res;

    fn invoke<'a, H: NfsHandler + ?Sized>(
        handler: &'a H,
        context: &'a Context,
        args: Self::Args,
    ) -> BoxFuture<'a, HandlerResult<Self::Res>> {
        handler.access(context, args)
    }
}

pub type AccessCall = NfsCall<Access>;
pub type AccessReply = NfsReply<Access>;
