use super::*;

#[derive(Debug, Parser)]
#[command(about = "Read Hacker News from the terminal", version)]
pub(crate) struct Arguments {
  #[command(subcommand)]
  command: Command,
  /// Config file to load instead of the default location
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,
  /// Log debug output to stderr
  #[arg(short, long, global = true)]
  verbose: bool,
}

impl Arguments {
  fn initialize_logging(&self) {
    let default = if self.verbose {
      "warn,hn_reader=debug"
    } else {
      "warn"
    };

    let filter = EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(io::stderr)
      .init();
  }

  pub(crate) async fn run(self) -> anyhow::Result<()> {
    self.initialize_logging();

    let config = Config::load(self.config.as_deref())
      .context("could not load configuration")?;

    self.command.run(config).await
  }
}
