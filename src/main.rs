use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = tix::cli::Cli::parse();
    let _log_guard = tix::logging::init(cli.log_filter.clone(), cli.log_file.as_deref())?;
    let config = tix::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(tix::cli::CliCommand::Tui) | None => {
            tix::tui::run(config)?;
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tix::commands::execute_blocking(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
