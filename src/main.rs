use clap::Parser;
use quiz_runner::{Args, Config, Quiz, QuizError, logging};
use tracing::info;

async fn run(args: Args) -> Result<(), QuizError> {
    let config = Config::try_from(args)?;
    logging::init(&config.log_file)?;
    info!(source = %config.source, "starting quiz runner");

    Quiz::new(&config).run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
