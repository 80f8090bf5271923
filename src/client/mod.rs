//! Client side of the GL debug server protocol.

pub(crate) mod endpoints;
pub(crate) mod http;
pub(crate) mod server;

pub use endpoints::{DebugAction, LogTail, ObjectKind};
pub use http::HttpDebugServer;
pub use server::DebugServer;
