use crate::demo::{
    run_auto_assign, run_demo, run_health_report, run_recommend, AutoAssignArgs, DemoArgs,
    HealthReportArgs, RecommendArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use congregation_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Congregation Scoring",
    about = "Run volunteer matching and church health scoring from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank and assign volunteers to ministry needs
    Volunteers {
        #[command(subcommand)]
        command: VolunteerCommand,
    },
    /// Build executive health reports
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommand,
    },
    /// Walk through matching and reporting on synthetic church data
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum VolunteerCommand {
    /// Suggest up to five volunteers and roles for an assignment need
    AutoAssign(AutoAssignArgs),
    /// Score volunteer profiles for the recommendations view
    Recommend(RecommendArgs),
}

#[derive(Subcommand, Debug)]
enum AnalyticsCommand {
    /// Generate the executive health report for one period
    Report(HealthReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Volunteers {
            command: VolunteerCommand::AutoAssign(args),
        } => run_auto_assign(args),
        Command::Volunteers {
            command: VolunteerCommand::Recommend(args),
        } => run_recommend(args),
        Command::Analytics {
            command: AnalyticsCommand::Report(args),
        } => run_health_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
