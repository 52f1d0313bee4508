use clap::Parser;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use monster::{Cookie, Wordlist};

#[derive(Parser, Debug)]
#[command(name = "cookiemonster", version, about = "Recover the secret behind a signed cookie")]
struct Args {
    /// The raw cookie value to attack.
    cookie: String,

    /// Path to a wordlist file (one base64-encoded secret per line).
    /// Defaults to the embedded wordlist.
    #[arg(long)]
    wordlist: Option<String>,

    /// Number of parallel workers. Defaults to the machine's parallelism.
    #[arg(long)]
    workers: Option<usize>,

    /// Print which decoders matched before searching.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let mut wordlist = Wordlist::new();
    match &args.wordlist {
        Some(path) => wordlist
            .load_from_path(path)
            .map_err(|err| anyhow::anyhow!("failed to load wordlist {path:?}: {err}"))?,
        None => wordlist
            .load_default()
            .map_err(|err| anyhow::anyhow!("failed to load embedded default wordlist: {err}"))?,
    }
    tracing::info!(secrets = wordlist.count(), "wordlist loaded");

    let workers = args.workers.unwrap_or_else(|| {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    });

    let mut cookie = Cookie::new(&args.cookie);
    if !cookie.decode() {
        tracing::warn!("no decoder recognized this cookie");
        println!("no decoder matched this cookie");
        return Ok(());
    }
    if args.verbose {
        println!("{}", cookie.string());
    }

    let found = cookie
        .unsign(&wordlist, workers)
        .map_err(|err| anyhow::anyhow!("search failed: {err}"))?;

    if found {
        let (secret, _message, decoder_name) = cookie.result().expect("found implies result");
        tracing::info!(decoder = decoder_name, "secret recovered");
        println!(
            "[{}] secret found: {}",
            decoder_name,
            String::from_utf8_lossy(secret)
        );
    } else {
        tracing::warn!("exhausted wordlist without finding a match");
        println!("secret not found in wordlist");
    }

    Ok(())
}
