//! Interactive chat loop
//!
//! One conversation session per run: plain input becomes a follow-up turn,
//! slash commands cover the rest (generate, clear, history). Each relay
//! round-trip is awaited to completion before the next prompt is shown.

use std::sync::Arc;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use productshelf::SelectionSet;

use crate::assistant::{self, ChatOutcome};
use crate::chat::{ConversationSession, Role};
use crate::relay::RelayApi;

/// Interactive assistant session
pub struct ReplSession {
    relay: Arc<dyn RelayApi>,
    session: ConversationSession,
    selection: SelectionSet,
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}

impl ReplSession {
    pub fn new(relay: Arc<dyn RelayApi>, selection: SelectionSet) -> Self {
        Self {
            relay,
            session: ConversationSession::new(),
            selection,
        }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self, initial_question: Option<String>) -> Result<()> {
        self.print_welcome();

        if let Some(question) = initial_question {
            println!("{} {}", ">".bright_green(), question);
            self.process_input(&question).await;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show a new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Routine Builder Assistant".bright_cyan().bold());
        println!(
            "{} product(s) selected. Type {} to build a routine, or just ask a question.",
            self.selection.len(),
            "/generate".yellow()
        );
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/generate" | "/g" => {
                self.generate().await;
                SlashResult::Continue
            }
            "/products" | "/p" => {
                self.print_selection();
                SlashResult::Continue
            }
            "/clear" | "/c" => {
                self.session.reset();
                println!("{}", "Conversation cleared.".dimmed());
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:12} Show this help", "/help".yellow());
        println!("  {:12} Generate a routine from the selected products", "/generate".yellow());
        println!("  {:12} Show the selected products", "/products".yellow());
        println!("  {:12} Clear the conversation", "/clear".yellow());
        println!("  {:12} Show the conversation so far", "/history".yellow());
        println!("  {:12} Exit", "/quit".yellow());
        println!();
        println!("Anything else is sent to the assistant as a follow-up question.");
        println!("Use the {} command to change the product selection.", "ps".bold());
        println!();
    }

    fn print_selection(&self) {
        if self.selection.is_empty() {
            println!("{}", "No products selected".dimmed());
            return;
        }
        for (index, product) in self.selection.products().iter().enumerate() {
            println!(
                "{:>3}. {} {}",
                index,
                product.name.bold(),
                format!("({})", product.brand).dimmed()
            );
        }
    }

    fn print_history(&self) {
        if self.session.is_empty() {
            println!("{}", "No conversation yet.".dimmed());
            return;
        }

        println!();
        for message in self.session.messages() {
            let label = match message.role {
                Role::System => "system".dimmed(),
                Role::User => "you".bright_green(),
                Role::Assistant => "assistant".bright_blue(),
            };
            println!("{}: {}", label, message.content);
        }
        println!();
    }

    async fn generate(&mut self) {
        println!("{}", "Generating your personalized routine...".dimmed());
        let products = self.selection.products().to_vec();
        let outcome = assistant::generate_routine(&mut self.session, self.relay.as_ref(), &products).await;
        self.print_outcome(outcome);
    }

    async fn process_input(&mut self, input: &str) {
        println!("{}", "Thinking...".dimmed());
        let outcome = assistant::follow_up(&mut self.session, self.relay.as_ref(), input).await;
        self.print_outcome(outcome);
    }

    fn print_outcome(&self, outcome: ChatOutcome) {
        match outcome {
            ChatOutcome::Reply(text) => {
                println!();
                println!("{}", text);
                println!();
            }
            ChatOutcome::Notice(text) => {
                println!("{}", text.yellow());
            }
            ChatOutcome::Ignored => {}
        }
    }
}
