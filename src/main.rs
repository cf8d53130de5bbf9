use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod theme;

/// Try out rawprompt's prompts from the shell.
#[derive(Parser)]
#[command(name = "rawprompt", version, about, long_about = None)]
struct Cli {
    /// Load prompt colors and prefixes from a TOML theme file.
    #[arg(long, global = true, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Disable all styling.
    #[arg(long, global = true)]
    plain: bool,

    /// Log debug output to stderr (-vv for trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask a yes/no question; prints `true` or `false`.
    Confirm {
        message: String,

        /// Make "no" the answer for a bare Enter.
        #[arg(long)]
        default_no: bool,
    },

    /// Ask for a line of text.
    Input {
        message: String,

        /// Answer used when the line is left empty.
        #[arg(long)]
        default: Option<String>,

        /// Greyed-out hint shown while the line is empty.
        #[arg(long)]
        placeholder: Option<String>,

        /// Reject empty answers.
        #[arg(long)]
        required: bool,

        /// Minimum answer length in characters.
        #[arg(long)]
        min_length: Option<usize>,
    },

    /// Ask for a secret.
    Password {
        message: String,

        /// Character echoed for each typed character.
        #[arg(long, default_value_t = '*')]
        mask: char,

        /// Minimum length in characters.
        #[arg(long)]
        min_length: Option<usize>,
    },

    /// Pick one option; prints the chosen option.
    Select {
        message: String,

        #[arg(required = true)]
        options: Vec<String>,

        /// Initially highlighted option (0-based).
        #[arg(long, default_value_t = 0)]
        default: usize,

        /// Wrap around at either end of the list.
        #[arg(long)]
        cyclic: bool,
    },

    /// Pick any number of options; prints one chosen option per line.
    MultiSelect {
        message: String,

        #[arg(required = true)]
        options: Vec<String>,

        /// Initially checked options (0-based, comma separated).
        #[arg(long, value_delimiter = ',')]
        defaults: Vec<usize>,

        /// Require at least this many options.
        #[arg(long)]
        min: Option<usize>,

        /// Allow at most this many options.
        #[arg(long)]
        max: Option<usize>,

        #[arg(long)]
        cyclic: bool,
    },

    /// Run a sample sign-up form; prints the answers as JSON.
    Form {
        /// Print compact JSON on one line.
        #[arg(long)]
        compact: bool,
    },

    /// Show a spinner for a while.
    Spinner {
        #[arg(long, default_value = "Working...")]
        message: String,

        /// One of: line, dots, mini-dots, arc, points.
        #[arg(long, default_value = "dots")]
        style: rawprompt::SpinnerStyle,

        /// How long to spin, in milliseconds.
        #[arg(long, default_value_t = 2000)]
        duration: u64,

        /// Milliseconds per frame; 0 uses the style's own pace.
        #[arg(long, default_value_t = 0)]
        interval: u64,
    },

    /// Print a table from comma-separated columns and rows.
    Table {
        /// Header cells, comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// One row, comma separated. Repeat for more rows.
        #[arg(long = "row")]
        rows: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,

        /// Automatically install completions into your shell config.
        #[arg(long)]
        install: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    theme::apply(cli.theme.as_deref(), cli.plain);

    match cli.command {
        Command::Confirm {
            message,
            default_no,
        } => commands::confirm::run(&message, !default_no),
        Command::Input {
            message,
            default,
            placeholder,
            required,
            min_length,
        } => commands::input::run(commands::input::InputArgs {
            message,
            default,
            placeholder,
            required,
            min_length,
        }),
        Command::Password {
            message,
            mask,
            min_length,
        } => commands::input::run_password(&message, mask, min_length),
        Command::Select {
            message,
            options,
            default,
            cyclic,
        } => commands::select::run(&message, options, default, cyclic),
        Command::MultiSelect {
            message,
            options,
            defaults,
            min,
            max,
            cyclic,
        } => commands::select::run_multi(commands::select::MultiArgs {
            message,
            options,
            defaults,
            min,
            max,
            cyclic,
        }),
        Command::Form { compact } => commands::form::run(compact),
        Command::Spinner {
            message,
            style,
            duration,
            interval,
        } => commands::spinner::run(&message, style, duration, interval),
        Command::Table { columns, rows } => commands::table::run(columns, &rows),
        Command::Completions { shell, install } => {
            commands::completions::run(shell, install);
        }
    }
}

/// `warn` by default, `-v` for debug, `-vv` for trace. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
