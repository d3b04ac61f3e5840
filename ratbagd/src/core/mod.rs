//! Core implementation: the shared client context and the object proxy
//! base every typed proxy is built on.

pub(crate) mod context;
pub(crate) mod object;
