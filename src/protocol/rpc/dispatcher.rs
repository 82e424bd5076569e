//! Turns one RPC call record into one reply record.
//!
//! Every call passes through the stages of [`DispatchStage`]:
//!
//! 1. The common RPC header is decoded and checked. A call for another
//!    RPC version, program or program version is answered with an RPC
//!    level rejection and never reaches a procedure. Only `AUTH_NULL` and
//!    `AUTH_UNIX` credentials are accepted; other flavors get
//!    `AUTH_ERROR(AUTH_REJECTEDCRED)`.
//! 2. The procedure number selects a [`Procedure`](crate::protocol::nfs::v3::Procedure)
//!    and its arguments are decoded (`GARBAGE_ARGS` if that fails).
//! 3. The [`NfsHandler`] produces the procedure result.
//! 4. The result is validated against the procedure's allowed errors and
//!    encoded into a single record carrying the call's xid.

use std::io::{Cursor, Read};
use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use super::message::RpcMessage;
use super::Context;
use crate::error::{Error, HandlerError};
use crate::handler::NfsHandler;
use crate::protocol::nfs::v3::{self, NfsReply, Procedure};
use crate::protocol::xdr::{self, deserialize, nfs3, nfs3::ReplyStatus};

/// Progress of a single call through the dispatcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchStage {
    AwaitingHeader,
    DecodingArguments,
    AwaitingHandler,
    EncodingReply,
    Sent,
}

/// Routes decoded NFS version 3 calls to an [`NfsHandler`].
///
/// Holds no per-call state, so a single dispatcher serves any number of
/// concurrent calls and connections.
pub struct Dispatcher<H: ?Sized> {
    handler: Arc<H>,
}

impl<H: ?Sized> Clone for Dispatcher<H> {
    fn clone(&self) -> Self {
        Dispatcher { handler: self.handler.clone() }
    }
}

impl<H: NfsHandler + ?Sized> Dispatcher<H> {
    pub fn new(handler: Arc<H>) -> Dispatcher<H> {
        Dispatcher { handler }
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }

    /// Handles one call given as a record payload, without record marking.
    ///
    /// Returns the complete, record-marked reply. An RPC level rejection is
    /// a reply too; `Err` means there is nothing to send for this record.
    pub async fn dispatch(&self, payload: &[u8], context: &Context) -> Result<Vec<u8>, Error> {
        trace!(stage = ?DispatchStage::AwaitingHeader, "{} bytes", payload.len());
        let mut src = Cursor::new(payload);
        let message = deserialize::<xdr::rpc::rpc_msg>(&mut src)?;
        let xid = message.xid;
        let call = match message.body {
            xdr::rpc::rpc_body::CALL(call) => call,
            xdr::rpc::rpc_body::REPLY(_) => {
                error!("Unexpectedly received a Reply instead of a Call");
                return Err(Error::UnexpectedMessage(format!("reply with xid {xid}")));
            }
        };

        if call.rpcvers != xdr::rpc::RPC_VERSION {
            warn!("Invalid RPC version {} != {}", call.rpcvers, xdr::rpc::RPC_VERSION);
            return xdr::rpc::rpc_vers_mismatch(xid).encode();
        }

        let mut context = context.clone();
        match call.cred.flavor {
            xdr::rpc::auth_flavor::AUTH_NULL => {}
            xdr::rpc::auth_flavor::AUTH_UNIX => {
                match deserialize::<xdr::rpc::auth_unix>(&mut Cursor::new(&call.cred.body)) {
                    Ok(auth) => context.auth = auth,
                    Err(e) => {
                        warn!("xid {}: malformed AUTH_UNIX credentials: {}", xid, e);
                        return xdr::rpc::auth_error_reply_message(
                            xid,
                            xdr::rpc::auth_stat::AUTH_BADCRED,
                        )
                        .encode();
                    }
                }
            }
            flavor => {
                warn!("xid {}: unsupported credential flavor {:?}", xid, flavor);
                return xdr::rpc::auth_error_reply_message(
                    xid,
                    xdr::rpc::auth_stat::AUTH_REJECTEDCRED,
                )
                .encode();
            }
        }

        if call.prog != nfs3::PROGRAM {
            warn!("Unknown RPC Program number {} != {}", call.prog, nfs3::PROGRAM);
            return xdr::rpc::prog_unavail_reply_message(xid).encode();
        }
        if call.vers != nfs3::VERSION {
            warn!("Unsupported NFS program version {} (supported {})", call.vers, nfs3::VERSION);
            return xdr::rpc::prog_mismatch_reply_message(xid, nfs3::VERSION).encode();
        }

        v3::handle_nfs(self.handler.as_ref(), xid, call.proc, &mut src, &context).await
    }

    /// Handles one complete record-marked call record.
    pub async fn dispatch_record(
        &self,
        record: &[u8],
        context: &Context,
    ) -> Result<Vec<u8>, Error> {
        let payload = super::wire::unframe(record, &super::wire::WireConfig::default())?;
        self.dispatch(&payload, context).await
    }
}

/// Decodes the arguments of `P`, runs the handler and encodes the reply.
pub(crate) async fn dispatch_procedure<P, H, R>(
    handler: &H,
    xid: u32,
    src: &mut R,
    context: &Context,
) -> Result<Vec<u8>, Error>
where
    P: Procedure,
    H: NfsHandler + ?Sized,
    R: Read + Send,
{
    trace!(stage = ?DispatchStage::DecodingArguments, xid, "{}", P::NAME);
    let args = match deserialize::<P::Args>(src) {
        Ok(args) => args,
        Err(e) => {
            warn!("{}({}): cannot decode arguments: {}", P::NAME, xid, e);
            return xdr::rpc::garbage_args_reply_message(xid).encode();
        }
    };
    debug!("{}({}) {:?}", P::NAME, xid, args);

    trace!(stage = ?DispatchStage::AwaitingHandler, xid, "{}", P::NAME);
    let result = match P::invoke(handler, context, args).await {
        Ok(result) => result,
        Err(HandlerError::Unimplemented) => {
            warn!("{}({}): procedure unavailable", P::NAME, xid);
            return xdr::rpc::proc_unavail_reply_message(xid).encode();
        }
        Err(HandlerError::Failed(e)) => {
            error!("{}({}): handler failed: {:#}", P::NAME, xid, e);
            P::Res::failure(nfs3::nfsstat3::NFS3ERR_SERVERFAULT)
        }
    };

    trace!(stage = ?DispatchStage::EncodingReply, xid, "{}", P::NAME);
    let reply = NfsReply::<P>::new(xid, result).inspect_err(|e| error!("{}", e))?;
    debug!("{}", reply);
    let record = reply.encode()?;
    trace!(stage = ?DispatchStage::Sent, xid, "{}", P::NAME);
    Ok(record)
}
