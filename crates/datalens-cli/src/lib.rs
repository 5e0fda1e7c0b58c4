mod cli;
mod config;
mod select;
mod sql_check;
mod update;

use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    match cli::parse_args(&args)? {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Select(args) => {
            load_project(&args.config)?;
            select::run(args)
        }
        cli::Command::Update(args) => {
            load_project(&args.config)?;
            update::run(args)
        }
        cli::Command::Sql(cli::SqlCommand::Check(args)) => {
            let project = load_project(&args.config)?;
            sql_check::run(args, &project)
        }
    }
}

/// Load the config for a command that runs something and start logging.
fn load_project(config_path: &Path) -> anyhow::Result<config::ProjectConfig> {
    let project = config::ProjectConfig::load_or_default(config_path.to_path_buf())?;
    init_tracing(&project.file.log.level);
    Ok(project)
}

/// Log to stderr; `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
