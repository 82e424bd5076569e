//! Complete NFS version 3 call and reply messages.
//!
//! [`NfsCall`] is the RPC call header plus the arguments of one procedure,
//! [`NfsReply`] the accepted `SUCCESS` reply header plus its result. Both
//! are plain values: they are built once, encoded or decoded once and
//! never changed in between.

use std::fmt;
use std::io::{Read, Write};

use num_traits::ToPrimitive;

use super::{validate_result, Procedure};
use crate::error::Error;
use crate::protocol::rpc::RpcMessage;
use crate::protocol::xdr::nfs3::{self, ReplyStatus};
use crate::protocol::xdr::{self, deserialize, Serialize};

/// A call of procedure `P`.
#[derive(Clone, Debug, PartialEq)]
pub struct NfsCall<P: Procedure> {
    pub xid: u32,
    /// Caller credentials, `AUTH_NULL` unless set
    pub cred: xdr::rpc::opaque_auth,
    pub verf: xdr::rpc::opaque_auth,
    pub args: P::Args,
}

impl<P: Procedure> NfsCall<P> {
    pub fn new(xid: u32, args: P::Args) -> NfsCall<P> {
        NfsCall {
            xid,
            cred: xdr::rpc::opaque_auth::default(),
            verf: xdr::rpc::opaque_auth::default(),
            args,
        }
    }

    pub fn with_credentials(mut self, cred: xdr::rpc::opaque_auth) -> NfsCall<P> {
        self.cred = cred;
        self
    }
}

impl<P: Procedure> RpcMessage for NfsCall<P> {
    fn xid(&self) -> u32 {
        self.xid
    }

    fn header(&self) -> xdr::rpc::rpc_msg {
        xdr::rpc::rpc_msg {
            xid: self.xid,
            body: xdr::rpc::rpc_body::CALL(xdr::rpc::call_body {
                rpcvers: xdr::rpc::RPC_VERSION,
                prog: nfs3::PROGRAM,
                vers: nfs3::VERSION,
                proc: P::PROCEDURE.to_u32().unwrap_or_default(),
                cred: self.cred.clone(),
                verf: self.verf.clone(),
            }),
        }
    }

    fn payload_size(&self) -> usize {
        self.args.packed_size()
    }

    fn write_payload<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.args.serialize(dest)
    }

    fn read_payload<R: Read>(header: xdr::rpc::rpc_msg, src: &mut R) -> Result<Self, Error> {
        let xdr::rpc::rpc_body::CALL(call) = header.body else {
            return Err(Error::UnexpectedMessage(format!("reply with xid {}", header.xid)));
        };
        let expected = P::PROCEDURE.to_u32().unwrap_or_default();
        if call.rpcvers != xdr::rpc::RPC_VERSION
            || call.prog != nfs3::PROGRAM
            || call.vers != nfs3::VERSION
            || call.proc != expected
        {
            return Err(Error::UnexpectedMessage(format!(
                "call xid={} rpcvers={} prog={} vers={} proc={} is not {}",
                header.xid, call.rpcvers, call.prog, call.vers, call.proc, P::NAME
            )));
        }
        Ok(NfsCall { xid: header.xid, cred: call.cred, verf: call.verf, args: deserialize(src)? })
    }
}

impl<P: Procedure> fmt::Display for NfsCall<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} call xid={} {:?}", P::NAME, self.xid, self.args)
    }
}

/// A successful reply of procedure `P`.
///
/// "Successful" refers to RPC: the result inside may well carry an NFS
/// error status. A reply can only be built with a status `P` is allowed
/// to return.
#[derive(Clone, Debug, PartialEq)]
pub struct NfsReply<P: Procedure> {
    xid: u32,
    result: P::Res,
}

impl<P: Procedure> NfsReply<P> {
    /// Fails with [`Error::DisallowedStatus`] if `result` carries a status
    /// `P` may not return, or a failure body with `NFS3_OK`.
    pub fn new(xid: u32, result: P::Res) -> Result<NfsReply<P>, Error> {
        validate_result::<P>(&result)?;
        Ok(NfsReply { xid, result })
    }

    pub fn status(&self) -> nfs3::nfsstat3 {
        self.result.status()
    }

    pub fn result(&self) -> &P::Res {
        &self.result
    }

    pub fn into_result(self) -> P::Res {
        self.result
    }
}

impl<P: Procedure> RpcMessage for NfsReply<P> {
    fn xid(&self) -> u32 {
        self.xid
    }

    fn header(&self) -> xdr::rpc::rpc_msg {
        xdr::rpc::make_success_reply(self.xid)
    }

    fn payload_size(&self) -> usize {
        self.result.packed_size()
    }

    fn write_payload<W: Write>(&self, dest: &mut W) -> std::io::Result<()> {
        self.result.serialize(dest)
    }

    fn read_payload<R: Read>(header: xdr::rpc::rpc_msg, src: &mut R) -> Result<Self, Error> {
        match &header.body {
            xdr::rpc::rpc_body::REPLY(xdr::rpc::reply_body::MSG_ACCEPTED(accepted))
                if accepted.reply_data == xdr::rpc::accept_body::SUCCESS => {}
            _ => return Err(Error::UnexpectedMessage(header.to_string())),
        }
        NfsReply::new(header.xid, deserialize(src)?)
    }

    fn validate(&self) -> Result<(), Error> {
        validate_result::<P>(&self.result)
    }
}

impl<P: Procedure> fmt::Display for NfsReply<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} reply xid={} {:?}: {:?}", P::NAME, self.xid, self.status(), self.result)
    }
}
