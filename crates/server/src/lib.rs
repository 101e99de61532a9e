//! This crate provides the command-line surface and the stdio JSON dispatcher
//! for the `aosm` layered resource manager.
//!
//! The main entry point is the [`run`] function. The [`dispatch`] module is
//! the transport-neutral boundary used by `aosm serve` and by embedders that
//! want to answer requests themselves. Other parts of the crate are internal.

mod app;
pub mod cli;
mod commands;
pub mod dispatch;

pub use app::run;
pub use dispatch::{Dispatcher, ErrorBody, Request, Response};
