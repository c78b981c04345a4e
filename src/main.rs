use clap::Parser;
use worktravel::cli::commands::Cli;
use worktravel::cli::handlers;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let result = handlers::resolve_data_dir(cli.data_dir.as_deref())
                .and_then(|dir| worktravel::tui::run(&dir));
            if let Err(e) = result {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
