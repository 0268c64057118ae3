use std::process::ExitCode;
use clap::Parser;
use codilla_stream::errors::ErrorHandler;
use codilla_stream::structs::cli::Cli;
use codilla_stream::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new(cli.config);

    match runner.run_command(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ErrorHandler::handle_error(&e);
            ExitCode::FAILURE
        }
    }
}
