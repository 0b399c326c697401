use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use action_commands::config::{self, Settings};
use action_commands::env::{self, InputOptions, ProcessEnv};
use action_commands::process::run_in_group;
use action_commands::release::ReleaseRunner;
use action_commands::{Actions, Directive, Error, Result, StdoutSink, Value};

#[derive(Debug, Parser)]
#[command(author, version, about = "Emit CI workflow commands from shell steps")]
struct Args {
    /// Log diagnostics at debug level (stderr)
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Load KEY=VALUE pairs from this file before reading inputs
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit an arbitrary command: ::name k=v,...::value
    Command {
        /// Command name; empty renders as missing.command
        name: String,
        /// Parameter as key=value; repeatable, order is kept
        #[arg(long = "param", short = 'p')]
        params: Vec<String>,
        /// Command value
        value: Option<String>,
        /// Parse the value and parameter values as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit a debug message, shown when step debug logging is on
    Debug {
        /// Message text; newlines are escaped
        message: String,
    },
    /// Print a plain log line
    Info {
        /// Line written verbatim
        message: String,
    },
    /// Emit a warning annotation
    Warning {
        /// Message text; newlines are escaped
        message: String,
    },
    /// Emit an error annotation without failing the step
    Error {
        /// Message text; newlines are escaped
        message: String,
    },
    /// Register a named step output
    SetOutput {
        /// Output name
        name: String,
        /// Output value
        value: String,
        /// Parse the value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a value for a later step of the same action
    SaveState {
        /// State name, read back from STATE_<name>
        name: String,
        /// State value
        value: String,
        /// Parse the value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the value saved by save-state in an earlier step
    GetState {
        /// State name
        name: String,
    },
    /// Print an action input read from INPUT_<NAME>
    GetInput {
        /// Input name as declared in action.yml, e.g. source-dir
        name: String,
        /// Fail the step when the input is unset or empty
        #[arg(long)]
        required: bool,
        /// Value printed when the input is unset or empty
        #[arg(long)]
        default: Option<String>,
    },
    /// Turn echoing of workflow commands on or off
    Echo {
        #[arg(value_enum)]
        mode: EchoMode,
    },
    /// Mask a value in all later log output
    AddMask {
        /// Secret to mask
        value: String,
    },
    /// Run a command between ::group:: and ::endgroup::
    Group {
        /// Group title shown in the log
        title: String,
        /// Command and arguments, after `--`
        #[arg(last = true, required = true)]
        argv: Vec<String>,
    },
    /// Emit an error and exit non-zero
    Fail {
        /// Error message
        message: String,
    },
    /// Tag and push vX, vX.Y, vX.Y.Z for a release
    Release {
        /// Release version, e.g. v1.2.3
        version: String,
        /// Git remote to push the tags to
        #[arg(long, default_value = "origin")]
        remote: String,
        /// Print the git commands without running them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EchoMode {
    /// Echo commands to the log
    On,
    /// Stop echoing commands
    Off,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let actions = Actions::stdout();

    if let Err(e) = setup(&args) {
        actions.set_failed(&e.to_string());
    }
    if let Err(e) = run(args.cmd, &actions) {
        tracing::debug!(error = ?e, "command failed");
        actions.set_failed_with(&e.to_string(), e.exit_code());
    }
    Ok(())
}

fn setup(args: &Args) -> Result<()> {
    if let Some(path) = args.env_file.as_deref() {
        config::load_env_file(path)?;
    }
    let settings = Settings::resolve(&ProcessEnv, args.verbose, args.env_file.as_deref());
    config::init_tracing(&settings)
}

fn run(cmd: Command, actions: &Actions<StdoutSink>) -> Result<()> {
    match cmd {
        Command::Command {
            name,
            params,
            value,
            json,
        } => {
            let mut directive = Directive::new(name).value(parse_value(value, json)?);
            for raw in params {
                let (key, val) = raw
                    .split_once('=')
                    .ok_or_else(|| Error::msg(format!("parameter '{raw}' is not key=value")))?;
                directive = directive.param(key, parse_value(Some(val.to_string()), json)?);
            }
            actions.emit_directive(&directive)
        }
        Command::Debug { message } => actions.debug(&message),
        Command::Info { message } => actions.info(&message),
        Command::Warning { message } => actions.warning(&message),
        Command::Error { message } => actions.error(&message),
        Command::SetOutput { name, value, json } => {
            actions.set_output(&name, parse_value(Some(value), json)?)
        }
        Command::SaveState { name, value, json } => {
            actions.save_state(&name, parse_value(Some(value), json)?)
        }
        Command::GetState { name } => actions.info(&env::get_state(&ProcessEnv, &name)),
        Command::GetInput {
            name,
            required,
            default,
        } => {
            let opts = InputOptions { required, default };
            match env::get_input(&ProcessEnv, &name, &opts)? {
                Some(v) => actions.info(&v),
                None => Ok(()),
            }
        }
        Command::Echo { mode } => actions.set_command_echo(matches!(mode, EchoMode::On)),
        Command::AddMask { value } => actions.add_mask(&value),
        Command::Group { title, argv } => run_in_group(actions, &title, &argv),
        Command::Fail { message } => actions.set_failed(&message),
        Command::Release {
            version,
            remote,
            dry_run,
        } => {
            let runner = ReleaseRunner { remote, dry_run };
            let tags = runner.run(&version)?;
            actions.set_output("tags", Value::structured(&tags)?)
        }
    }
}

fn parse_value(raw: Option<String>, json: bool) -> Result<Value> {
    match raw {
        None => Ok(Value::Absent),
        Some(s) if json => Ok(serde_json::from_str::<serde_json::Value>(&s)?.into()),
        Some(s) => Ok(Value::Text(s)),
    }
}
