//! Bot binary entry point

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use bot::config::{RecognizerBackend, SearchBackend, StoreBackend};
use bot::{Bot, BotConfig, BotResult, Reply};
use shared::logging;

#[derive(Parser)]
#[command(name = "bot")]
#[command(about = "Answers questions about the Third Thursday lunch rotation")]
struct Args {
    /// Answer a single message and exit instead of starting a chat
    #[arg(long, short)]
    message: Option<String>,

    /// Print replies as JSON
    #[arg(long)]
    json: bool,

    /// Visit history backend (overrides VISIT_STORE)
    #[arg(long, value_enum)]
    store: Option<StoreBackend>,

    /// Restaurant search backend (overrides RESTAURANT_SEARCH)
    #[arg(long, value_enum)]
    search: Option<SearchBackend>,

    /// Intent recognizer backend (overrides INTENT_RECOGNIZER)
    #[arg(long, value_enum)]
    recognizer: Option<RecognizerBackend>,

    /// Seed for reproducible recommendations
    #[arg(long)]
    seed: Option<u64>,

    /// Read settings from this file instead of the nearest .env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn load_config(&self) -> BotResult<BotConfig> {
        let mut config = match &self.env_file {
            Some(path) => BotConfig::from_env_file(path)?,
            None => BotConfig::from_env()?,
        };
        if let Some(store) = self.store {
            config.store = store;
        }
        if let Some(search) = self.search {
            config.search = search;
        }
        if let Some(recognizer) = self.recognizer {
            config.recognizer = recognizer;
        }
        Ok(config)
    }
}

fn render(reply: &Reply, json: bool) -> BotResult<String> {
    if json {
        Ok(serde_json::to_string(reply)?)
    } else {
        Ok(reply.to_plain_text())
    }
}

async fn chat(bot: &Bot, json: bool) -> BotResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout.write_all(b"Ask me about Third Thursday lunches (\"quit\" to leave).\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }
        if !message.is_empty() {
            let reply = bot.handle_turn(message).await;
            stdout.write_all(render(&reply, json)?.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> BotResult<()> {
    let args = Args::parse();
    logging::init_tracing(&args.log_level)?;

    let config = args.load_config()?;
    logging::log_startup(&format!(
        "bot (store={}, search={}, recognizer={}, location={})",
        config.store, config.search, config.recognizer, config.preferred_location
    ));

    let mut bot = Bot::from_config(&config)?;
    if let Some(seed) = args.seed {
        bot = bot.with_seed(seed);
    }

    match &args.message {
        Some(message) => {
            let reply = bot.handle_turn(message).await;
            println!("{}", render(&reply, args.json)?);
        }
        None => chat(&bot, args.json).await?,
    }

    logging::log_shutdown("conversation finished");
    Ok(())
}
