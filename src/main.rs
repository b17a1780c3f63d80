// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use kyra::app_config::{self, Config, DEFAULT_CONFIG_FILE};
use kyra::report::REPORT_FILENAME;
use kyra::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the web dashboard (default command)
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Register a student
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address (unique)
        #[arg(long)]
        email: String,
    },

    /// Log an internship for a registered student
    LogInternship {
        /// Registered student email
        #[arg(long)]
        email: String,

        /// Company name
        #[arg(long)]
        company: String,

        /// Duration, e.g. "3 months"
        #[arg(long)]
        duration: String,

        /// Experience or comments
        #[arg(long, default_value = "")]
        feedback: String,

        /// Number of MSMEs digitalized
        #[arg(long, default_value_t = 0)]
        msmes: u32,
    },

    /// Rate your experience from 1 to 5
    Feedback {
        /// Registered student email
        #[arg(long)]
        email: String,

        /// Rating from 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        /// Comments
        #[arg(long, default_value = "")]
        comments: String,
    },

    /// Show a student's progress
    Progress {
        /// Registered student email
        #[arg(long)]
        email: String,

        /// Also write the progress chart to this PNG file
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Show dashboard metrics
    Metrics,

    /// Generate the PDF report of all internships
    Report {
        /// Output file
        #[arg(short, long, default_value = REPORT_FILENAME)]
        output: PathBuf,
    },

    /// Generate shell completions for kyra
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Ky'ra - your internship journey mentor
///
/// Tracks student internships: registration, internship logging, feedback,
/// progress charts and a PDF report.
#[derive(Parser, Debug)]
#[command(name = "kyra")]
#[command(version)]
#[command(about = "Internship tracking dashboard")]
#[command(long_about = "Ky'ra tracks student internships and serves a small web dashboard.

EXAMPLES:
    kyra                                              # Serve the dashboard on 127.0.0.1:8501
    kyra serve --port 9000                            # Serve on another port
    kyra register --name Alice --email a@x.com        # Register a student
    kyra log-internship --email a@x.com --company Acme --duration '3 months' --msmes 2
    kyra feedback --email a@x.com --rating 5          # Leave feedback
    kyra progress --email a@x.com --chart alice.png   # Show progress and write the chart
    kyra report -o report.pdf                         # Export the PDF report
    kyra completions bash > kyra.bash                 # Generate bash completions

CONFIGURATION:
    Configuration is stored in kyra.json by default. If the file doesn't exist,
    a default one is created. KYRA_DATABASE_PATH overrides the database file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config_path: PathBuf,

    /// Database file (overrides config and environment)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Coloured stderr logger; filtering follows `log::max_level()`
struct CustomLogger;

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    /// ANSI colour code per level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "kyra", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = cli.log_level {
        log::set_max_level(app_config::LogLevel::from(level).into());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    config.apply_env_overrides();
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    let controller = Controller::with_config(config)?;

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { .. } => controller.serve().await?,
        Commands::Register { name, email } => {
            controller.register(&name, &email).await?;
            println!("Registered {} <{}>", name.trim(), email.trim());
        }
        Commands::LogInternship {
            email,
            company,
            duration,
            feedback,
            msmes,
        } => {
            controller
                .log_internship(&email, &company, &duration, &feedback, msmes)
                .await?;
            println!("Internship logged successfully! You're making great progress!");
        }
        Commands::Feedback {
            email,
            rating,
            comments,
        } => {
            controller.submit_feedback(&email, rating, &comments).await?;
            println!("Thank you for your feedback! We're listening.");
        }
        Commands::Progress { email, chart } => match controller.progress(&email).await? {
            None => warn!("No student registered under {}", email),
            Some((student, summary)) => {
                println!("Hi {}! Here's how you're progressing today.", student.student.name);
                if summary.internship_count == 0 {
                    println!("No internships logged yet. Log your first internship to see your progress!");
                } else {
                    println!("Internship Completion: {}%", summary.percent);
                    for badge in &summary.badges {
                        println!("{}", badge);
                    }
                    for internship in &student.internships {
                        println!(
                            "  {} ({}): {} MSME(s) digitalized",
                            internship.company_name, internship.duration, internship.msme_digitalized
                        );
                    }
                }
                if let Some(path) = chart {
                    if !controller.export_chart(&email, &path).await? {
                        warn!("No chart to write: no internships logged");
                    }
                }
            }
        },
        Commands::Metrics => {
            let metrics = controller.metrics().await?;
            println!("{}", metrics);
        }
        Commands::Report { output } => match controller.export_report(&output).await? {
            Some(pages) => info!("Report saved to {:?} ({} page(s))", output, pages),
            None => println!("No internship data available to generate a report."),
        },
        Commands::Completions { .. } => {}
    }

    Ok(())
}
