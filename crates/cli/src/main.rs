mod commands;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{Shell, generate};
use commands::ConfigArgs;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitegraft")]
#[command(
    version,
    about = "Merge a landing bundle into a generated site and rebase its asset paths",
    long_about = None
)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write a default sitegraft.toml
    Init {
        /// Directory to create sitegraft.toml in
        path: PathBuf,

        /// Site URL to put in the generated config
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Check configuration and report what a build would touch
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Run the post-build pass over a generated site
    Build {
        #[command(flatten)]
        config: ConfigArgs,

        /// Exit with an error when any item failed
        #[arg(long)]
        strict: bool,
    },

    /// Serve the output tree locally
    Preview {
        #[command(flatten)]
        config: ConfigArgs,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Init { path, site_url } => commands::init::run(path, site_url),
        Command::Validate { config } => commands::validate::run(config),
        Command::Build { config, strict } => commands::build::run(config, strict),
        Command::Preview { config, port } => commands::preview::run(config, port).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sitegraft", &mut io::stdout());
            Ok(())
        }
    }
}
