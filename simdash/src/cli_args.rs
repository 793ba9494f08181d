use crate::{
    client::Client,
    config::Config,
    dashboard::{
        position::{Position, Size},
        simulation::Simulation,
        surface::{
            writer::{Format, WriterSurface},
            Surface,
        },
    },
    error::Error,
    utils::any::Any,
};
use clap::{Args, Parser, Subcommand};
use std::{io::Write, path::PathBuf, process::ExitCode};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Subcommand)]
pub enum Command {
    /// Feed control tokens to the simulation without a terminal and print the resulting map draw description
    Replay(ReplayArgs),
}

#[derive(Args, Clone)]
pub struct ReplayArgs {
    /// Map viewport width; defaults to the configured minimum viewport
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=ReplayArgs::MAX_VIEWPORT))]
    pub width: Option<i32>,

    /// Map viewport height; defaults to the configured minimum viewport
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=ReplayArgs::MAX_VIEWPORT))]
    pub height: Option<i32>,

    /// Starting position as x,y; defaults to the configured initial position
    #[arg(long)]
    pub start: Option<Position>,

    #[arg(default_value_t, long, value_enum)]
    pub format: Format,

    /// Fail on tokens other than up, down, left, right, A and B instead of ignoring them
    #[arg(long)]
    pub strict: bool,

    pub tokens: Vec<String>,
}

impl ReplayArgs {
    const MAX_VIEWPORT: i64 = 10_000;

    fn replay<W: Write>(&self, mut config: Config, writer: W) -> Result<W, Error> {
        if let Some(start) = self.start {
            config.agent.initial = start.some();
        }

        let min_viewport = config.map.min_viewport;
        let viewport = Size::new(
            self.width.unwrap_or(min_viewport.width),
            self.height.unwrap_or(min_viewport.height),
        );
        let mut simulation = Simulation::new(&config, viewport);

        for token in &self.tokens {
            if self.strict {
                simulation.handle_control_strict(token)?;
            } else {
                simulation.handle_control(token);
            }
        }

        let mut surface = WriterSurface::new(writer, self.format);

        surface.paint(&simulation.describe())?;

        surface.into_inner().ok()
    }

    pub fn run(&self, config: Config) -> Result<ExitCode, Error> {
        self.replay(config, std::io::stdout().lock())?.unit();

        ExitCode::SUCCESS.ok()
    }
}

#[derive(Parser)]
#[command(about, version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long = "config")]
    pub config_filepath: Option<PathBuf>,

    #[arg(long = "logs")]
    pub log_filepath: Option<PathBuf>,
}

impl CliArgs {
    fn env_filter() -> EnvFilter {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    }

    // NOTE: the interactive dashboard owns the terminal, so it only logs when given a log file
    fn init_tracing(&self) -> Result<(), Error> {
        match (&self.log_filepath, &self.command) {
            (Some(log_filepath), _) => {
                let log_file = log_filepath.create()?;

                tracing_subscriber::fmt()
                    .with_env_filter(Self::env_filter())
                    .with_writer(log_file)
                    .json()
                    .init();
            }
            (None, Some(Command::Replay(_replay_args))) => tracing_subscriber::fmt()
                .with_env_filter(Self::env_filter())
                .with_writer(std::io::stderr)
                .init(),
            (None, None) => {}
        }

        ().ok()
    }

    pub async fn run(self) -> Result<ExitCode, Error> {
        self.init_tracing()?;

        let config = Config::load(self.config_filepath.as_deref())?;

        match self.command {
            Some(Command::Replay(replay_args)) => replay_args.run(config),
            None => Client::run(config).await,
        }
    }
}
