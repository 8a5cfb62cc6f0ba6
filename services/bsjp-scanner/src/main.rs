//! BSJP Scanner - terminal front end for the overnight-gap screener.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bsjp_common::config::{config_path, Config, IgnoredOverride};
use bsjp_common::logging::init_logging;
use bsjp_scanner::screener::{ReportFormat, Renderer, ScanReport};
use bsjp_scanner::{ScanResult, ScannerService};
use clap::{Parser, Subcommand};
use console::Term;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::Select;

/// Stock scanner for the Beli Sore Jual Pagi (buy afternoon, sell morning) strategy.
#[derive(Parser, Debug)]
#[command(name = "bsjp-scanner")]
#[command(version)]
#[command(about = "Rank IDX stocks for the overnight-gap trade (simulated data).", long_about = None)]
struct Cli {
    /// Config file (default: ~/.bsjp/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed the market data generator for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Menu-driven session (default)
    Interactive,

    /// Run one scan, print the signals and exit
    Scan {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: ReportFormat,

        /// Rows per signal table
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print every stock with its scores
    Stocks {
        /// Show a single ticker
        #[arg(short, long)]
        symbol: Option<String>,
    },

    /// Print scan statistics
    Stats,

    /// Print the strategy guide
    Guide,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

const MENU: &[&str] = &[
    "Rescan",
    "All stocks",
    "Statistics",
    "Strategy guide",
    "Quit",
];

fn load_config(cli: &Cli) -> Result<(Config, Vec<IgnoredOverride>)> {
    let (mut config, ignored) = Config::load_with_env(cli.config.as_deref())?;

    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if cli.no_color {
        config.display.color = false;
    }

    config.validate().context("Invalid configuration")?;
    Ok((config, ignored))
}

fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = path.map_or_else(config_path, Path::to_path_buf);
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    let config = Config::default();
    match path {
        Some(p) => config.save_to(p)?,
        None => config.save()?,
    }
    println!("Wrote default configuration to {}", target.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(Commands::Init { force }) = &cli.command {
        return init_config(cli.config.as_deref(), *force);
    }

    let (mut config, ignored) = load_config(&cli)?;

    init_logging(
        &config.observability.log_level,
        &config.observability.log_format,
    );
    tracing::info!("BSJP Scanner v{}", env!("CARGO_PKG_VERSION"));
    for item in &ignored {
        tracing::warn!(var = item.var, value = %item.value, "Ignoring unparsable environment override");
    }

    if !config.display.color {
        console::set_colors_enabled(false);
    }

    let command = cli.command.unwrap_or(Commands::Interactive);
    if let Commands::Scan {
        limit: Some(limit), ..
    } = &command
    {
        config.display.display_limit = (*limit).max(1);
    }

    let renderer = Renderer::for_stdout(config.display.color, config.display.display_limit);
    let mut service = ScannerService::from_config(&config)?;

    match command {
        Commands::Interactive => run_interactive(&mut service, &renderer),
        Commands::Scan { format, .. } => {
            let result = service.scan();
            if format == ReportFormat::Table {
                print!("{}", renderer.header(chrono::Local::now()));
            }
            print!("{}", ScanReport::new(&result, renderer).generate(format));
            if format == ReportFormat::Json {
                println!();
            }
            Ok(())
        }
        Commands::Stocks { symbol } => {
            let table = match symbol {
                Some(symbol) => {
                    let snapshot = service.snapshot(&symbol)?;
                    renderer.stocks_table(std::slice::from_ref(snapshot))
                }
                None => renderer.stocks_table(service.snapshots()),
            };
            print!("{}", renderer.header(chrono::Local::now()));
            print!("{}", table);
            Ok(())
        }
        Commands::Stats => {
            let result = service.scan();
            let stats = service.statistics(&result);
            print!("{}", renderer.header(chrono::Local::now()));
            print!("{}", renderer.statistics(&stats, &result));
            Ok(())
        }
        Commands::Guide => {
            print!("{}", renderer.header(chrono::Local::now()));
            print!("{}", renderer.strategy_guide());
            Ok(())
        }
        Commands::Init { .. } => Ok(()),
    }
}

fn show(term: &Term, renderer: &Renderer, body: &str) -> Result<()> {
    term.clear_screen()?;
    print!("{}", renderer.header(chrono::Local::now()));
    print!("{}", body);
    Ok(())
}

fn run_interactive(service: &mut ScannerService, renderer: &Renderer) -> Result<()> {
    let term = Term::stdout();
    let theme: Box<dyn Theme> = if console::colors_enabled() {
        Box::new(ColorfulTheme::default())
    } else {
        Box::new(SimpleTheme)
    };

    let mut result: ScanResult = service.scan();
    show(&term, renderer, &renderer.signals(&result))?;

    loop {
        let choice = Select::with_theme(theme.as_ref())
            .with_prompt("Menu")
            .items(MENU)
            .default(0)
            .interact_on_opt(&term)
            .context("Failed to read menu selection")?;

        match choice {
            Some(0) => {
                service.refresh()?;
                result = service.scan();
                show(&term, renderer, &renderer.signals(&result))?;
            }
            Some(1) => show(&term, renderer, &renderer.stocks_table(service.snapshots()))?,
            Some(2) => {
                let stats = service.statistics(&result);
                show(&term, renderer, &renderer.statistics(&stats, &result))?;
            }
            Some(3) => show(&term, renderer, &renderer.strategy_guide())?,
            _ => break,
        }
    }

    tracing::info!("Session ended");
    Ok(())
}
