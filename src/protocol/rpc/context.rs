//! RPC context implementation for per-call caller information.
//!
//! A [`Context`] is created for every connection and refined for every
//! call: the dispatcher fills in the `AUTH_UNIX` credentials the call
//! carries before the handler sees it. Credentials are only parsed, never
//! verified.

use std::fmt;

use crate::protocol::xdr;

/// Represents the execution context for one RPC call
///
/// Passed to every [`NfsHandler`](crate::handler::NfsHandler) method so a
/// backend can apply its own permission checks.
#[derive(Clone, Default)]
pub struct Context {
    /// Client's network address (IP:port) used for logging
    pub client_addr: String,

    /// UNIX-style authentication credentials from the client.
    /// Left at the default when the call uses another flavor
    pub auth: xdr::rpc::auth_unix,
}

impl Context {
    pub fn new(client_addr: impl Into<String>) -> Context {
        Context { client_addr: client_addr.into(), auth: xdr::rpc::auth_unix::default() }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("rpc::Context")
            .field("client_addr", &self.client_addr)
            .field("uid", &self.auth.uid)
            .field("gid", &self.auth.gid)
            .finish()
    }
}
