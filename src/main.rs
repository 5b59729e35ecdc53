use anyhow::Result;
use clap::Parser;
use kitchen_timers::{app, config::Args};

fn main() -> Result<()> {
    app::run(Args::parse())
}
