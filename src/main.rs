use clap::Parser;
use notepin::cli::{
    handle_add, handle_delete, handle_edit, handle_get, handle_init, handle_list, Cli, Commands,
};
use notepin::Config;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("notepin=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::discover();
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "resolved config");

    let result = match cli.command {
        Commands::Init => handle_init(&config),
        Commands::Add {
            title,
            content,
            stdin,
            tags,
            pin,
            json,
        } => handle_add(&config, title, content, stdin, tags, pin, json),
        Commands::Edit {
            id,
            title,
            content,
            stdin,
            tags,
            pin,
            unpin,
            json,
        } => handle_edit(&config, id, title, content, stdin, tags, pin, unpin, json),
        Commands::Delete { id, force } => handle_delete(&config, id, force),
        Commands::List { tag, sort, json } => handle_list(&config, tag, sort, json),
        Commands::Get { id, json } => handle_get(&config, id, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
