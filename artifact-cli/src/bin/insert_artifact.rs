use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "insert-artifact",
    version,
    about = "Insert an artifact JSON into the artifact-db database"
)]
struct Args {
    /// Path to the artifact JSON file
    json_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present; variables already set in the environment win
    dotenvy::dotenv().ok();

    let args = Args::parse();
    artifact_cli::logging::init();

    let result = artifact_cli::insert::run(&args.json_file, &mut io::stdout().lock()).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
