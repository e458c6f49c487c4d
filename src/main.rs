use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use nearpoint::prompt::Prompter;
use nearpoint::report::format_match;
use nearpoint::find_nearest;

#[derive(Parser, Debug)]
#[command(name = "nearpoint")]
#[command(about = "Interactively match each point in a first set to its nearest neighbor in a second set.", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    nearpoint::init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    prompter.say("Match each point in the first set to its nearest neighbor in the second.\n")?;

    prompter.say("First set of points:")?;
    let source = prompter.collect_points().context("reading first set")?;
    if source.is_empty() {
        prompter.say("No points provided for set 1. Exiting.")?;
        return Ok(());
    }

    prompter.say("\nSecond set of points:")?;
    let target = prompter.collect_points().context("reading second set")?;
    if target.is_empty() {
        prompter.say("No points provided for set 2. Exiting.")?;
        return Ok(());
    }
    drop(prompter);

    let matches = find_nearest(&source, &target)?;
    let mut out = io::stdout().lock();
    writeln!(out)?;
    for m in &matches {
        writeln!(out, "{}", format_match(m))?;
    }

    Ok(())
}
