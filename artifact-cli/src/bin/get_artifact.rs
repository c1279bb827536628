use std::io;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "get-artifact", version, about = "Retrieve an artifact by knowledge_id")]
struct Args {
    /// Knowledge ID of the artifact to retrieve
    knowledge_id: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present; variables already set in the environment win
    dotenvy::dotenv().ok();

    let args = Args::parse();
    artifact_cli::logging::init();

    let result = {
        let mut out = io::stdout().lock();
        let mut diag = io::stderr().lock();
        artifact_cli::fetch::run(&args.knowledge_id, &mut out, &mut diag).await
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
