use crate::demo::{run_benchmark, run_demo, BenchmarkArgs, DemoArgs};
use crate::server;
use careeriq::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "CareerIQ",
    about = "Benchmark career profiles and generate development plans",
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
    /// Score a profile document and print its benchmark and recommendations
    Benchmark(BenchmarkArgs),
    /// Walk a sample profile through benchmarking, planning and tracking
    Demo(DemoArgs),
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
        Command::Benchmark(args) => run_benchmark(args),
        Command::Demo(args) => run_demo(args),
    }
}
