#![forbid(unsafe_code)]

//! `glyphburst`: interactive particle text in the terminal.
//!
//! ```bash
//! cargo run -p glyphburst_term -- --words HELLO WORLD
//! ```

use glyphburst_term::{Cli, Config, Program, headless, logging};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::from_cli(&cli)?;
    logging::init(config.verbosity, &config.log_target())?;

    if config.headless {
        let report = headless::run(&config)?;
        println!("{report}");
        println!("self-check passed");
        return Ok(());
    }

    let summary = Program::new(config).run()?;
    info!(
        frames = summary.frames,
        starts = summary.starts,
        triggered = summary.triggered,
        "terminal program exited"
    );
    Ok(())
}
