use clap::Parser;
use salescall::cli::{Args, parse_exit_code};
use salescall::commands::{DEFAULT_OUTPUT_DIR, create_command_registry};
use salescall::display;
use salescall::providers::factory::create_provider;
use std::io;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };
    init_tracing(args.verbose);

    let dispatcher = create_command_registry();
    let mut stdout = io::stdout();

    let result = dispatcher
        .run(
            args.command.as_deref(),
            &args.args,
            &args.config,
            DEFAULT_OUTPUT_DIR,
            create_provider,
            &mut stdout,
        )
        .await;

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        display::display_error(&e);
        std::process::exit(1);
    }
}
