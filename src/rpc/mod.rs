/// JSON-RPC transport for the progress service
///
/// The API gateway talks to this service over line-delimited JSON-RPC 2.0
/// on stdin/stdout. This module defines the message structures and the
/// request loop.

pub mod protocol;
pub mod server;

pub use server::RpcServer;
