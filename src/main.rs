use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use slidecast::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => slidecast::app::run_generate(cli)?,
        Some(Commands::Sizes) => slidecast::app::run_sizes(),
        Some(Commands::Pauses { audio }) => slidecast::app::run_pauses(cli, audio)?,
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                *shell,
                &mut Cli::command(),
                "slidecast",
                &mut std::io::stdout(),
            );
        }
    }
    Ok(())
}
