use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::Result;
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password, Select};
use prepcoach_core::{
    ask_coach, completion_client_from_config, configure_with_key, load_config, AnswerPayload,
    CompletionClient, Evaluator, InterviewSession, PrepConfig,
};
use prepcoach_schema::{Category, COACH_SUGGESTIONS};

use crate::ui;

const LANGUAGES: &[&str] = &["Python", "Java", "C++", "JavaScript"];

#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    Question(Category),
    Submit,
    Progress,
    Suggest,
    Ask(usize),
    Resources,
    NewSession,
    Chat(String),
    Invalid(String),
    Empty,
}

pub fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }
    if line == "quit" || line == "exit" {
        return ReplCommand::Quit;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Chat(line.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("quit" | "exit" | "q", _) => ReplCommand::Quit,
        ("help" | "h", _) => ReplCommand::Help,
        ("question", Some(raw)) => match raw.parse::<Category>() {
            Ok(category) => ReplCommand::Question(category),
            Err(e) => ReplCommand::Invalid(e.to_string()),
        },
        ("question", None) => {
            ReplCommand::Invalid("usage: /question <dsa|system-design|behavioral>".into())
        }
        ("submit", _) => ReplCommand::Submit,
        ("progress", _) => ReplCommand::Progress,
        ("suggest", _) => ReplCommand::Suggest,
        ("ask", Some(raw)) => match raw.parse::<usize>() {
            Ok(n) if (1..=COACH_SUGGESTIONS.len()).contains(&n) => ReplCommand::Ask(n),
            _ => ReplCommand::Invalid(format!(
                "suggestion number must be between 1 and {}",
                COACH_SUGGESTIONS.len()
            )),
        },
        ("ask", None) => ReplCommand::Invalid("usage: /ask <n>".into()),
        ("resources", _) => ReplCommand::Resources,
        ("new", _) => ReplCommand::NewSession,
        (other, _) => ReplCommand::Invalid(format!("unknown command: /{other}")),
    }
}

/// Message shown when a structured answer has empty sections.
pub fn incomplete_message(category: Category) -> &'static str {
    match category {
        Category::Dsa => "Please provide both code solution and explanation.",
        Category::SystemDesign => "Please fill in all sections of the system design.",
        Category::Behavioral => "Please complete all STAR components.",
    }
}

struct PracticeRepl {
    config: PrepConfig,
    client: CompletionClient,
    session: InterviewSession,
    days_until_interview: u32,
    term: Term,
    theme: ColorfulTheme,
}

pub async fn run_practice(config_dir: &Path, days_override: Option<u32>) -> Result<()> {
    let config = load_config(config_dir)?;
    let client = completion_client_from_config(&config)?;
    let days_until_interview = days_override.unwrap_or(config.practice.days_until_interview);
    let session = InterviewSession::new(config.practice.rotation);

    let mut repl = PracticeRepl {
        config,
        client,
        session,
        days_until_interview,
        term: Term::stdout(),
        theme: ColorfulTheme::default(),
    };

    ui::print_logo(&repl.term);
    repl.prompt_api_key();
    let _ = repl.term.write_line(&format!(
        "Session {} started. {} days until the interview. Type /help for commands.",
        style(repl.session.session_id()).cyan(),
        repl.days_until_interview
    ));
    tracing::info!(
        session_id = repl.session.session_id(),
        configured = repl.client.is_configured(),
        "practice session started"
    );

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }

        match parse_command(&input) {
            ReplCommand::Quit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Help => ui::print_help(&repl.term),
            ReplCommand::Question(category) => {
                let active = repl.session.request_question(category);
                ui::render_question_card(&repl.term, active.question);
            }
            ReplCommand::Submit => repl.submit().await,
            ReplCommand::Progress => ui::render_progress(&repl.term, &repl.session),
            ReplCommand::Suggest => ui::render_suggestions(&repl.term),
            ReplCommand::Ask(n) => {
                let message = COACH_SUGGESTIONS[n - 1];
                repl.chat(message).await;
            }
            ReplCommand::Resources => ui::render_resources(&repl.term),
            ReplCommand::NewSession => {
                repl.session.start_new_session();
                let _ = repl.term.write_line(&format!(
                    "New session {} started.",
                    style(repl.session.session_id()).cyan()
                ));
            }
            ReplCommand::Chat(message) => repl.chat(&message).await,
            ReplCommand::Invalid(reason) => {
                let _ = repl.term.write_line(&format!("{}", style(reason).red()));
            }
        }
    }

    tracing::info!(
        session_id = repl.session.session_id(),
        submissions = repl.session.ledger().total_submissions(),
        "practice session ended"
    );
    Ok(())
}

impl PracticeRepl {
    fn prompt_api_key(&mut self) {
        if self.client.is_configured() {
            return;
        }
        let _ = self.term.write_line(&format!(
            "{}",
            style("No API key configured. Evaluations need a key for the completion service.")
                .yellow()
        ));
        let key = match Password::with_theme(&self.theme)
            .with_prompt("API key (leave empty to skip)")
            .allow_empty_password(true)
            .interact()
        {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("could not read api key: {e}");
                return;
            }
        };
        if key.trim().is_empty() {
            return;
        }
        match configure_with_key(&mut self.client, &self.config, &key) {
            Ok(()) => ui::print_done(&self.term, "API key configured for this session."),
            Err(e) => {
                let _ = self.term.write_line(&format!("{}", style(e).red()));
            }
        }
    }

    async fn chat(&mut self, message: &str) {
        let reply = ask_coach(
            &mut self.session,
            &self.client,
            message,
            self.days_until_interview,
        )
        .await;
        ui::render_coach_reply(&self.term, &reply);
    }

    async fn submit(&mut self) {
        let Some(active) = self.session.active_question() else {
            let _ = self.term.write_line(&format!(
                "{}",
                style("Request a question first with /question <category>.").red()
            ));
            return;
        };
        let category = active.category;

        let payload = match self.read_payload(category) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(category = category.slug(), "answer entry failed: {e}");
                let _ = self.term.write_line(&format!(
                    "{}",
                    style(format!(
                        "Could not read your answer ({e}). The question is still active."
                    ))
                    .red()
                ));
                return;
            }
        };
        if !payload.is_complete() {
            tracing::debug!(missing = ?payload.missing_fields(), "incomplete answer rejected");
            let _ = self
                .term
                .write_line(&format!("{}", style(incomplete_message(category)).red()));
            return;
        }

        let _ = self
            .term
            .write_line(&format!("{}", style("Evaluating your answer...").dim()));
        let evaluator = Evaluator::new(&self.client);
        if let Some(submission) = self.session.submit_answer(&evaluator, &payload).await {
            ui::render_submission(&self.term, &submission);
        }
    }

    /// Interactive prompts on a terminal, plain line input otherwise.
    fn read_payload(&self, category: Category) -> Result<AnswerPayload> {
        let stdin = std::io::stdin();
        if !stdin.is_terminal() {
            return read_payload_lines(&mut stdin.lock(), category);
        }
        self.prompt_payload(category)
    }

    fn prompt_payload(&self, category: Category) -> Result<AnswerPayload> {
        let payload = match category {
            Category::Dsa => {
                let idx = Select::with_theme(&self.theme)
                    .with_prompt("Language")
                    .items(LANGUAGES)
                    .default(0)
                    .interact()?;
                AnswerPayload::Dsa {
                    language: LANGUAGES[idx].to_string(),
                    code: read_block(&self.term, "Your solution")?,
                    explanation: read_block(&self.term, "Explain your approach")?,
                }
            }
            Category::SystemDesign => AnswerPayload::SystemDesign {
                requirements: self.field("1. Requirements clarification")?,
                high_level: self.field("2. High-level design")?,
                database: self.field("3. Database design")?,
                deep_dive: self.field("4. Deep dive")?,
            },
            Category::Behavioral => AnswerPayload::Behavioral {
                situation: self.field("Situation")?,
                task: self.field("Task")?,
                action: self.field("Action")?,
                result: self.field("Result")?,
            },
        };
        Ok(payload)
    }

    fn field(&self, prompt: &str) -> Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }
}

/// Read lines until a lone "." or end of input.
fn read_block(term: &Term, prompt: &str) -> Result<String> {
    let _ = term.write_line(&format!(
        "{} {}",
        style(prompt).bold(),
        style("(finish with a single '.' line)").dim()
    ));
    let stdin = std::io::stdin();
    collect_block(&mut stdin.lock())
}

fn collect_block(reader: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.trim_end() == "." {
            break;
        }
        lines.push(trimmed.to_string());
    }
    Ok(lines.join("\n"))
}

fn next_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        anyhow::bail!("input ended before the answer was complete");
    }
    Ok(line.trim().to_string())
}

/// Answer entry for piped input: one line per section, except DSA code and
/// explanation which are blocks ended by a lone ".".
fn read_payload_lines(reader: &mut impl BufRead, category: Category) -> Result<AnswerPayload> {
    let payload = match category {
        Category::Dsa => {
            let language = next_line(reader)?;
            AnswerPayload::Dsa {
                language: if language.is_empty() {
                    LANGUAGES[0].to_string()
                } else {
                    language
                },
                code: collect_block(reader)?,
                explanation: collect_block(reader)?,
            }
        }
        Category::SystemDesign => AnswerPayload::SystemDesign {
            requirements: next_line(reader)?,
            high_level: next_line(reader)?,
            database: next_line(reader)?,
            deep_dive: next_line(reader)?,
        },
        Category::Behavioral => AnswerPayload::Behavioral {
            situation: next_line(reader)?,
            task: next_line(reader)?,
            action: next_line(reader)?,
            result: next_line(reader)?,
        },
    };
    Ok(payload)
}
