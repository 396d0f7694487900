//! CLI binary for edgequake-askdoc.
//!
//! A thin shim over the library crate: maps CLI flags to `AssistantConfig`,
//! then either answers the `--question`s given on the command line or runs an
//! interactive session reading commands from stdin.

use anyhow::{Context as _, Result};
use clap::Parser;
use edgequake_askdoc::config::{DEFAULT_MODEL, DEFAULT_USER_AGENT};
use edgequake_askdoc::{Assistant, AssistantConfig, Context, SessionState};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const NO_CONTEXT_WARNING: &str = "Please provide a website URL or upload a PDF first.";

const SESSION_HELP: &str = "\
Commands:
  :pdf <path>   extract a PDF and make it the active context
  :web <url>    scrape a web page and make it the active context
  :show         print the active context
  :clear        drop the active context
  :help         show this help
  :quit         leave the session (also Ctrl-D)
Anything else is asked as a question about the active context.";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Interactive session
  askdoc

  # Ask about a PDF and exit
  askdoc --pdf report.pdf -q "What are the key findings?"

  # Several questions about a web page
  askdoc --url https://example.com -q "Who runs this site?" -q "What is it for?"

  # Use another model through OpenRouter
  askdoc --model openai/gpt-4o-mini --url https://example.com

  # JSON output
  askdoc --json --pdf paper.pdf -q "Summarise the abstract"

ENVIRONMENT VARIABLES:
  OPENROUTER_API_KEY      OpenRouter API key (default provider)
  OPENAI_API_KEY          OpenAI API key (with --provider openai)
  ANTHROPIC_API_KEY       Anthropic API key (with --provider anthropic)
  EDGEQUAKE_LLM_PROVIDER  Provider override (uses --model)
  PDFIUM_LIB_PATH         Path to libpdfium if it is not on the library path
  RUST_LOG                Log filter, e.g. edgequake_askdoc=debug
"#;

/// Ask questions about a PDF or a web page using an LLM.
#[derive(Parser, Debug)]
#[command(
    name = "askdoc",
    version,
    about = "Ask questions about a PDF or a web page using an LLM",
    long_about = "Extract the text of a PDF document or a web page, then ask natural-language \
questions about it. Answers come from a chat-completion model (OpenRouter by default; any \
provider supported by edgequake-llm works).",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// PDF file to load before asking.
    #[arg(long, env = "ASKDOC_PDF", conflicts_with = "url")]
    pdf: Option<PathBuf>,

    /// Web page URL to load before asking.
    #[arg(long, env = "ASKDOC_URL")]
    url: Option<String>,

    /// Question to ask (repeatable). Without it an interactive session starts.
    #[arg(short = 'q', long = "question")]
    questions: Vec<String>,

    /// Chat-completion model ID, used with whichever provider is selected.
    #[arg(long, env = "ASKDOC_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// LLM provider: openrouter, openai, anthropic, gemini, ollama, …
    #[arg(
        long,
        env = "ASKDOC_PROVIDER",
        long_help = "LLM provider. If not set: EDGEQUAKE_LLM_PROVIDER, then openrouter when \
          OPENROUTER_API_KEY is set, then auto-detection from API key env vars. The --model \
          value applies in every case."
    )]
    provider: Option<String>,

    /// User-Agent header for web fetches.
    #[arg(long, env = "ASKDOC_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Web fetch timeout in seconds (default: none).
    #[arg(long, env = "ASKDOC_FETCH_TIMEOUT")]
    fetch_timeout: Option<u64>,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "ASKDOC_PASSWORD")]
    password: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "ASKDOC_TEMPERATURE")]
    temperature: Option<f32>,

    /// Max tokens in each answer.
    #[arg(long, env = "ASKDOC_MAX_TOKENS")]
    max_tokens: Option<usize>,

    /// Print answers and contexts as JSON.
    #[arg(long, env = "ASKDOC_JSON")]
    json: bool,

    /// Disable spinners.
    #[arg(long, env = "ASKDOC_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "ASKDOC_VERBOSE")]
    verbose: bool,

    /// Suppress all output except answers and errors.
    #[arg(long, env = "ASKDOC_QUIET")]
    quiet: bool,
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Pdf(PathBuf),
    Web(String),
    Show,
    Clear,
    Help,
    Quit,
    Ask(String),
    Empty,
    Invalid(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Ask(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name, arg) {
            ("pdf", "") | ("web", "") => Command::Invalid(format!(":{name} needs an argument")),
            ("pdf", path) => Command::Pdf(PathBuf::from(path)),
            ("web", url) => Command::Web(url.to_string()),
            ("show", _) => Command::Show,
            ("clear", _) => Command::Clear,
            ("help", _) | ("h", _) => Command::Help,
            ("quit", _) | ("q", _) | ("exit", _) => Command::Quit,
            _ => Command::Invalid(format!("unknown command ':{name}' (try :help)")),
        }
    }
}

/// Output settings shared by every action.
struct Ui {
    json: bool,
    quiet: bool,
    spinners: bool,
}

impl Ui {
    fn spinner(&self, msg: &str) -> Option<ProgressBar> {
        if !self.spinners {
            return None;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    }

    fn status(&self, line: String) {
        if !self.quiet {
            eprintln!("{line}");
        }
    }

    fn print_loaded(&self, ctx: &Context) {
        match ctx {
            Context::Pdf(pdf) => self.status(format!(
                "{} PDF content extracted successfully! {}",
                green("✔"),
                dim(&format!("({} chars)", pdf.text.chars().count()))
            )),
            Context::Web(web) => self.status(format!(
                "{} Website content extracted successfully! {} {}",
                green("✔"),
                bold(&web.title),
                dim(&format!(
                    "({} headings, {} chars)",
                    web.headings.len(),
                    web.content.chars().count()
                ))
            )),
        }
    }

    fn print_context(&self, ctx: Option<&Context>) -> Result<()> {
        let Some(ctx) = ctx else {
            eprintln!("{} {}", yellow("⚠"), NO_CONTEXT_WARNING);
            return Ok(());
        };
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(ctx).context("Failed to serialise context")?
            );
            return Ok(());
        }
        match ctx {
            Context::Pdf(pdf) => {
                println!("Source:   PDF");
                println!("Chars:    {}", pdf.text.chars().count());
                println!("Text:     {}", preview(&pdf.text));
            }
            Context::Web(web) => {
                println!("Source:   web page");
                println!("Title:    {}", web.title);
                for h in &web.headings {
                    println!("Heading:  {h}");
                }
                println!("Chars:    {}", web.content.chars().count());
                println!("Content:  {}", preview(&web.content));
            }
        }
        Ok(())
    }

    fn print_answer(&self, question: &str, answer: &str) -> Result<()> {
        if self.json {
            let value = serde_json::json!({ "question": question, "answer": answer });
            println!(
                "{}",
                serde_json::to_string_pretty(&value).context("Failed to serialise answer")?
            );
        } else {
            write_answer(&mut io::stdout().lock(), answer)?;
        }
        Ok(())
    }
}

/// Write `answer` verbatim, adding a final newline if it lacks one.
fn write_answer<W: Write>(out: &mut W, answer: &str) -> Result<()> {
    out.write_all(answer.as_bytes())
        .context("Failed to write to stdout")?;
    if !answer.ends_with('\n') {
        out.write_all(b"\n").context("Failed to write to stdout")?;
    }
    Ok(())
}

fn preview(text: &str) -> String {
    let cut = edgequake_askdoc::extract::truncate_chars(text, 160);
    if cut.len() < text.len() {
        format!("{cut}\u{2026}")
    } else {
        cut.to_string()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let ui = Ui {
        json: cli.json,
        quiet: cli.quiet,
        spinners: !cli.quiet && !cli.no_progress && !cli.json && !cli.verbose,
    };

    let config = build_config(&cli)?;
    let mut assistant =
        Assistant::from_config(config).context("Failed to set up the LLM provider")?;

    // ── Preload ──────────────────────────────────────────────────────────
    if let Some(ref path) = cli.pdf {
        load_pdf(&mut assistant, &ui, path)
            .await
            .with_context(|| format!("Failed to extract {}", path.display()))?;
    } else if let Some(ref url) = cli.url {
        load_web(&mut assistant, &ui, url)
            .await
            .with_context(|| format!("Failed to scrape {url}"))?;
    }

    // ── One-shot mode ────────────────────────────────────────────────────
    if !cli.questions.is_empty() {
        if assistant.session().state() == SessionState::NoContext {
            anyhow::bail!("{NO_CONTEXT_WARNING} Use --pdf <PATH> or --url <URL>.");
        }
        for question in &cli.questions {
            ask(&assistant, &ui, question)
                .await
                .context("Failed to get an answer")?;
        }
        return Ok(());
    }

    // ── Interactive session ──────────────────────────────────────────────
    run_session(&mut assistant, &ui).await
}

async fn run_session(assistant: &mut Assistant, ui: &Ui) -> Result<()> {
    ui.status(format!("{}  {}", bold("askdoc"), dim("type :help for commands")));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !ui.quiet {
            eprint!("{} ", bold(">"));
            io::stderr().flush().ok();
        }
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };

        // Each action stands alone: report the failure and keep the session.
        let outcome = match Command::parse(&line) {
            Command::Empty => Ok(()),
            Command::Quit => break,
            Command::Help => {
                eprintln!("{SESSION_HELP}");
                Ok(())
            }
            Command::Invalid(msg) => {
                eprintln!("{} {msg}", yellow("⚠"));
                Ok(())
            }
            Command::Show => ui.print_context(assistant.session().context()),
            Command::Clear => {
                if assistant.end_session().is_some() {
                    ui.status(format!("{} Context cleared", green("✔")));
                }
                Ok(())
            }
            Command::Pdf(path) => load_pdf(assistant, ui, &path).await,
            Command::Web(url) => load_web(assistant, ui, &url).await,
            Command::Ask(question) => {
                if assistant.session().state() == SessionState::NoContext {
                    eprintln!("{} {}", yellow("⚠"), NO_CONTEXT_WARNING);
                    Ok(())
                } else {
                    ask(assistant, ui, &question).await
                }
            }
        };

        if let Err(e) = outcome {
            eprintln!("{} {:#}", red("✘"), e);
        }
    }

    Ok(())
}

async fn load_pdf(assistant: &mut Assistant, ui: &Ui, path: &std::path::Path) -> Result<()> {
    let spinner = ui.spinner(&format!("Extracting {}…", path.display()));
    let result = assistant.load_pdf(path).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    ui.print_loaded(result?);
    Ok(())
}

async fn load_web(assistant: &mut Assistant, ui: &Ui, url: &str) -> Result<()> {
    let spinner = ui.spinner(&format!("Fetching {url}…"));
    let result = assistant.load_website(url).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    ui.print_loaded(result?);
    Ok(())
}

async fn ask(assistant: &Assistant, ui: &Ui, question: &str) -> Result<()> {
    let spinner = ui.spinner("Thinking…");
    let result = assistant.ask(question).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    ui.print_answer(question, &result?)
}

/// Map CLI args to `AssistantConfig`.
fn build_config(cli: &Cli) -> Result<AssistantConfig> {
    let mut builder = AssistantConfig::builder()
        .model(cli.model.clone())
        .user_agent(cli.user_agent.clone());

    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(secs) = cli.fetch_timeout {
        builder = builder.fetch_timeout_secs(secs);
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(t) = cli.temperature {
        builder = builder.temperature(t);
    }
    if let Some(n) = cli.max_tokens {
        builder = builder.max_tokens(n);
    }

    builder.build().context("Invalid configuration")
}
