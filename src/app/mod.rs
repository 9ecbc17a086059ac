//! Core client logic: events, session state, the pure handler, and the
//! dispatcher that owns the connection's write path.

pub mod action;
pub mod dispatcher;
pub mod event;
pub mod handler;
pub mod sources;
pub mod state;
