// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use classday_core::{APP_NAME, Classday};
use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_assign::{CmdAssign, CmdClear, CmdRemove};
use crate::cmd_courses::CmdCourses;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_show::CmdShow;
use crate::cmd_watch::CmdWatch;
use crate::config::{ConfigOverrides, parse_config};

/// Run the classday command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Build, keep and follow your A/B day class schedule.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to show
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/classday/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/classday/config.toml on Windows. The CLASSDAY_CONFIG environment variable is used when \
this flag is absent.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdShow::command())
            .subcommand(CmdAssign::command())
            .subcommand(CmdRemove::command())
            .subcommand(CmdClear::command())
            .subcommand(CmdCourses::command())
            .subcommand(CmdWatch::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdShow::NAME, matches)) => Show(CmdShow::from(matches)),
            Some((CmdAssign::NAME, matches)) => Assign(CmdAssign::from(matches)),
            Some((CmdRemove::NAME, matches)) => Remove(CmdRemove::from(matches)),
            Some((CmdClear::NAME, matches)) => Clear(CmdClear::from(matches)),
            Some((CmdCourses::NAME, matches)) => Courses(CmdCourses::from(matches)),
            Some((CmdWatch::NAME, matches)) => Watch(CmdWatch::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => Show(CmdShow::default()),
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Show the schedule of the day
    Show(CmdShow),

    /// Assign a course to a period
    Assign(CmdAssign),

    /// Empty a period
    Remove(CmdRemove),

    /// Empty every period
    Clear(CmdClear),

    /// List or search courses
    Courses(CmdCourses),

    /// Follow the current period
    Watch(CmdWatch),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Show(a)    => Self::run_with(config, a.overrides(), |x| a.run(x).boxed()).await,
            Assign(a)  => Self::run_with(config, a.overrides(), |x| a.run(x).boxed()).await,
            Remove(a)  => Self::run_with(config, a.overrides(), |x| a.run(x).boxed()).await,
            Clear(a)   => Self::run_with(config, a.overrides(), |x| a.run(x).boxed()).await,
            Courses(a) => Self::run_with(config, ConfigOverrides::default(), |x| a.run(x).boxed()).await,
            Watch(a)   => Self::run_with(config, a.overrides(), |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(
        config: Option<PathBuf>,
        overrides: ConfigOverrides,
        f: F,
    ) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a mut Classday) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let mut core_config = parse_config(config).await?;
        overrides.apply(&mut core_config);
        let mut classday = Classday::new(core_config).await?;

        let result = f(&mut classday).await;

        classday.close().await?;
        result
    }
}
