mod command;
mod dictionary;
mod repl;
mod session;
mod words;

use clap::Parser as _;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Text,
    Json,
}

/// Find, print, add and delete rhyming words.
#[derive(clap::Parser)]
struct Args {
    /// Whitespace-separated word list to load at startup.
    #[arg(long, default_value = "dictionary.txt")]
    dictionary: std::path::PathBuf,

    #[arg(long, default_value = "text")]
    format: Format,

    /// Log more; repeat for trace output. RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(match args.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let (trie, _) = dictionary::load_path(&args.dictionary)?;
    if trie.is_empty() {
        let path = args.dictionary.display().to_string();
        log::warn!(path = path.as_str(); "dictionary has no words");
    }

    log::info!(format = format!("{:?}", args.format).as_str(); "rhyming dictionary");

    let mut session = session::Session::new(trie);
    repl::run(
        &mut session,
        std::io::stdin().lock(),
        std::io::stdout().lock(),
        args.format,
    )?;

    log::info!(words = session.trie().len(); "exiting");

    Ok(())
}
