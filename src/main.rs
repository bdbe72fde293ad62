use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use modglide::app::{App, DependencySource};
use modglide::config::Config;

#[derive(Parser)]
#[command(name = "modglide")]
#[command(
    version,
    about = "Compare Go module revisions with the ones recorded in glide.lock"
)]
struct Cli {
    /// Print every external command before running it
    #[arg(short = 'x', long)]
    print_commands: bool,

    /// glide.lock holding the recorded revisions
    #[arg(long, value_name = "PATH")]
    lock_file: Option<PathBuf>,

    /// Read dependencies from this go.mod instead of running `go list`
    #[arg(long, value_name = "PATH")]
    go_mod: Option<PathBuf>,

    /// Directory repositories are cloned into for commit lookups
    #[arg(long, value_name = "PATH")]
    clone_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(lock_file) = &self.lock_file {
            config.lock_file = lock_file.clone();
        }
        if let Some(clone_dir) = &self.clone_dir {
            config.clone_dir = Some(clone_dir.clone());
        }
        Ok(config)
    }

    fn dependency_source(&self) -> DependencySource {
        match &self.go_mod {
            Some(path) => DependencySource::GoMod(path.clone()),
            None => DependencySource::GoList,
        }
    }
}

fn init_logging(print_commands: bool) -> WorkerGuard {
    let default_level = if print_commands {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .without_time()
        .try_init();

    guard
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.load_config()?;
    let app = App::new(config, cli.print_commands);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(app.run(&cli.dependency_source(), std::io::stdout()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let guard = init_logging(cli.print_commands);

    let result = run(&cli);
    // Flush buffered log lines; process::exit skips destructors
    drop(guard);

    std::process::exit(result?)
}
