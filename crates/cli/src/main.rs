//! Command-line interface for the `aosm` application.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its core functionality to the `aosm-server` crate.

fn main() -> anyhow::Result<()> {
    aosm_server::run()
}
