use super::commands::{Command, COMMAND_BOX};
use crate::client::PolicyClient;
use crate::models::{ChatReply, RequestState, Result};
use crate::renderer::MarkdownRenderer;
use crate::transcript::{format_sources, Transcript};
use colored::*;
use rustyline::{config::Configurer, error::ReadlineError, DefaultEditor};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use terminal_size::{terminal_size, Width};

const GREETING: &str =
    "Hello! I'm your company policy assistant. Ask me anything about our policies!";
const INITIALIZING: &str = "System initializing, please wait...";

/// How long the latency readout stays visible after a successful answer.
const STATUS_LINGER: Duration = Duration::from_secs(2);

/// The single UI controller: owns the backend client, the transcript,
/// the line editor, and the one in-flight flag. No ambient globals.
pub struct TerminalUI {
    client: PolicyClient,
    transcript: Transcript,
    renderer: MarkdownRenderer,
    editor: DefaultEditor,
    history_file: PathBuf,
    width: usize,
    state: RequestState,
    status_linger: Duration,
}

impl TerminalUI {
    pub fn new(client: PolicyClient) -> Result<Self> {
        let width = usable_width(terminal_size().map(|(Width(w), _)| w));

        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(100)?;

        let history_file = dirs::home_dir()
            .map(|mut path| {
                path.push(".policy_chat_history");
                path
            })
            .unwrap_or_else(|| ".policy_chat_history".into());

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(Self {
            client,
            transcript: Transcript::new(),
            renderer: MarkdownRenderer::new(width),
            editor,
            history_file,
            width,
            state: RequestState::Idle,
            status_linger: STATUS_LINGER,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        clearscreen::clear()?;
        self.show_command_box();
        self.startup_greeting().await;

        loop {
            let prompt = format!("{}", "> ".blue().bold());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let command = line
                        .parse::<Command>()
                        .unwrap_or_else(|_| Command::Question(line));
                    match command {
                        Command::Exit => {
                            let _ = self.editor.save_history(&self.history_file);
                            break;
                        }
                        Command::Clear => {
                            clearscreen::clear()?;
                            self.show_command_box();
                        }
                        Command::Question(input) => {
                            if !input.trim().is_empty() {
                                self.editor.add_history_entry(&input)?;
                            }
                            self.handle_question(&input).await?;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'exit' to quit");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("Error: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// One-shot health check at startup. A healthy backend gets the
    /// greeting; anything else gets the initializing notice. Never an
    /// error path, never retried.
    async fn startup_greeting(&mut self) {
        let text = match self.client.health().await {
            Ok(health) if health.is_healthy() => GREETING,
            _ => INITIALIZING,
        };
        self.transcript.push_bot(text);
        print!("{}", self.renderer.render(text).cyan());
        println!("\n");
    }

    /// The submit flow. Empty input and re-entry while a request is
    /// outstanding are no-ops: nothing rendered, nothing sent.
    async fn handle_question(&mut self, input: &str) -> Result<()> {
        let question = match accepts(input, self.state) {
            Some(question) => question,
            None => return Ok(()),
        };

        self.transcript.push_user(question);
        self.state = RequestState::Pending;

        print!("{}", "Thinking...".yellow());
        io::stdout().flush()?;

        let outcome = self.client.ask(question).await;
        self.clear_status_line()?;
        self.finish_request(outcome).await
    }

    /// Renders a settled request and returns to `Idle` — after the
    /// status linger when a latency readout is shown, immediately on
    /// soft and transport failures or when the backend sent no latency.
    async fn finish_request(&mut self, outcome: Result<ChatReply>) -> Result<()> {
        match outcome {
            Ok(ChatReply::Answer {
                text,
                citations,
                latency,
            }) => {
                print!("{}", self.renderer.render(&text).cyan());
                println!();
                if let Some(sources) = format_sources(&citations) {
                    println!("{}", sources.green());
                }
                self.transcript.push_bot_with_citations(text, citations);

                if let Some(latency) = latency {
                    print!("{}", format!("Response time: {}s", latency).yellow());
                    io::stdout().flush()?;
                    tokio::time::sleep(self.status_linger).await;
                    self.clear_status_line()?;
                    println!();
                }
            }
            Ok(ChatReply::Failure { error }) => {
                let text = format!("Error: {}", error);
                println!("{}", text.red());
                println!();
                self.transcript.push_bot(text);
            }
            Err(e) => {
                let text = format!("Error: {}", e);
                println!("{}", text.red());
                println!();
                self.transcript.push_bot(text);
            }
        }
        self.state = RequestState::Idle;

        Ok(())
    }

    fn clear_status_line(&self) -> Result<()> {
        print!("\r{}\r", " ".repeat(self.width));
        io::stdout().flush()?;
        Ok(())
    }

    fn show_command_box(&self) {
        println!("{}", COMMAND_BOX.green());
        println!();
    }
}

/// Gatekeeper for the submit flow: trims the input, refusing empty
/// questions and re-entry while a request is already outstanding.
fn accepts(input: &str, state: RequestState) -> Option<&str> {
    let question = input.trim();
    if question.is_empty() || state == RequestState::Pending {
        return None;
    }
    Some(question)
}

/// Usable render width for a reported terminal width: two columns of
/// margin, clamped so a degenerate terminal cannot underflow.
fn usable_width(reported: Option<u16>) -> usize {
    match reported {
        Some(w) => (w as usize).saturating_sub(2).max(20),
        None => 80,
    }
}
