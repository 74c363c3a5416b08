//! Waymark - Entry Point
//!
//! Lists and resolves the routes linked into this binary.

// Force-link the feature modules so their linkme registrations are included
extern crate waymark_modules;

use clap::Parser;
use waymark::cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli)
}
