use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use productshelf::{SelectionSet, SlotStore};
use routinebuilder::assistant::{self, ChatOutcome};
use routinebuilder::chat::ConversationSession;
use routinebuilder::cli::{Cli, Command};
use routinebuilder::config::Config;
use routinebuilder::relay::RelayClient;
use routinebuilder::repl::ReplSession;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn load_selection(config: &Config) -> Result<SelectionSet> {
    let store = SlotStore::open(&config.storage.store_path)?;
    Ok(SelectionSet::load(store))
}

fn print_outcome(outcome: ChatOutcome) {
    match outcome {
        ChatOutcome::Reply(text) => println!("{}", text),
        ChatOutcome::Notice(text) => println!("{}", text.yellow()),
        ChatOutcome::Ignored => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("routinebuilder starting (model: {})", config.relay.model);
    let relay = Arc::new(RelayClient::from_config(&config.relay));

    match cli.command {
        Some(Command::Generate) => {
            let selection = load_selection(&config)?;
            let mut session = ConversationSession::new();
            let outcome = assistant::generate_routine(&mut session, relay.as_ref(), selection.products()).await;
            print_outcome(outcome);
        }
        Some(Command::Ask { question }) => {
            let mut session = ConversationSession::new();
            let outcome = assistant::follow_up(&mut session, relay.as_ref(), &question).await;
            print_outcome(outcome);
        }
        Some(Command::Chat { question }) => {
            let selection = load_selection(&config)?;
            ReplSession::new(relay, selection).run(question).await?;
        }
        None => {
            let selection = load_selection(&config)?;
            ReplSession::new(relay, selection).run(None).await?;
        }
    }

    Ok(())
}
