use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "datalens.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Select,
    Update,
    Sql,
    SqlCheck,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Select(SelectArgs),
    Update(UpdateArgs),
    Sql(SqlCommand),
}

#[derive(Debug, Clone)]
pub struct SelectArgs {
    pub config: PathBuf,
    /// Saved query builder JSON.
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UpdateArgs {
    pub config: PathBuf,
    /// Edited row JSON.
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub enum SqlCommand {
    Check(SqlCheckArgs),
}

#[derive(Debug, Clone)]
pub struct SqlCheckArgs {
    pub config: PathBuf,
    /// Accept non-SELECT statements regardless of `[sql] read_only`.
    pub allow_writes: bool,
    pub files: Vec<PathBuf>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "select" => parse_file_command(it.map(|s| s.as_str()), HelpTopic::Select),
        "update" => parse_file_command(it.map(|s| s.as_str()), HelpTopic::Update),
        "sql" => parse_sql(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// `select <FILE>` and `update <FILE>` share one shape.
fn parse_file_command<'a>(
    mut it: impl Iterator<Item = &'a str>,
    topic: HelpTopic,
) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut file: Option<PathBuf> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(topic)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other if file.is_none() => file = Some(PathBuf::from(other)),
            other => anyhow::bail!("unexpected argument: {other}"),
        }
    }

    let Some(file) = file else {
        return Ok(Command::Help(topic));
    };

    Ok(match topic {
        HelpTopic::Update => Command::Update(UpdateArgs { config, file }),
        _ => Command::Select(SelectArgs { config, file }),
    })
}

fn parse_sql<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut subcmd: Option<&str> = None;

    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut allow_writes = false;
    let mut files: Vec<PathBuf> = Vec::new();

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => {
                return Ok(Command::Help(match subcmd {
                    None => HelpTopic::Sql,
                    Some("check") => HelpTopic::SqlCheck,
                    Some(other) => anyhow::bail!("unknown subcommand: {other}"),
                }));
            }
            "check" if subcmd.is_none() => {
                subcmd = Some(token);
            }
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            "--allow-writes" => allow_writes = true,
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => files.push(PathBuf::from(other)),
        }
    }

    match subcmd {
        None => {
            // `datalens sql` alone is a request for help.
            if files.is_empty() && !allow_writes && config == PathBuf::from(DEFAULT_CONFIG) {
                return Ok(Command::Help(HelpTopic::Sql));
            }
            anyhow::bail!("missing subcommand: expected `datalens sql check`")
        }
        Some(_) => Ok(Command::Sql(SqlCommand::Check(SqlCheckArgs {
            config,
            allow_writes,
            files,
        }))),
    }
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
datalens - SQL generation for the DataLens MySQL browser

USAGE:
  datalens <COMMAND> [OPTIONS]

COMMANDS:
  select        Print the SELECT for a saved query builder
  update        Print the UPDATE for an edited row
  sql           Check raw SQL for the read-only query panel

Run `datalens <command> --help` for more."
            );
        }
        HelpTopic::Select => {
            println!(
                "\
USAGE:
  datalens select [OPTIONS] <FILE>

ARGS:
  <FILE>                Saved query builder (JSON)

OPTIONS:
  --config <FILE>       Config file path (default: datalens.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Update => {
            println!(
                "\
USAGE:
  datalens update [OPTIONS] <FILE>

ARGS:
  <FILE>                Edited row (JSON): table, cells, primary_key, table_columns

OPTIONS:
  --config <FILE>       Config file path (default: datalens.toml)
  -h, --help            Print help"
            );
        }
        HelpTopic::Sql => {
            println!(
                "\
USAGE:
  datalens sql check [OPTIONS] [FILES...]

SUBCOMMANDS:
  check         Split statements and apply the read-only policy (reads stdin if no files)

Run `datalens sql check --help` for more."
            );
        }
        HelpTopic::SqlCheck => {
            println!(
                "\
USAGE:
  datalens sql check [OPTIONS] [FILES...]

NOTES:
  - Input is split on `;`; each statement is classified separately.
  - In read-only mode any non-SELECT statement rejects its whole input.

OPTIONS:
  --config <FILE>       Config file path (default: datalens.toml)
  --allow-writes        Accept non-SELECT statements
  -h, --help            Print help"
            );
        }
    }
}
