use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use cli_prompt::interface_adapter::adapter::prompt_io_factory;
use cli_prompt::{Confirm, Input, ListEntry, PromptBuilder, PromptOptions, Secret, Select};

const LOG_ENV: &str = "CPROMPT_LOG";

/// Walk through every prompt kind and print the answers.
#[derive(Parser, Debug)]
#[command(name = "cprompt", version, about)]
struct Cli {
    /// JSON file with shared prompt options (pointer, prefix, keys, ...)
    #[arg(long, value_name = "JSON")]
    options: Option<PathBuf>,

    /// Where to keep suggestion history
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,
}

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| LevelFilter::from_str(&value).ok())
        .unwrap_or(LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn languages() -> Vec<ListEntry<String>> {
    let owned = |names: &[&str]| -> Vec<ListEntry<String>> {
        names.iter().map(|n| ListEntry::value(n.to_string())).collect()
    };
    vec![
        ListEntry::value("Rust".to_string()),
        ListEntry::group("Scripting", owned(&["Python", "Ruby", "Lua"])),
        ListEntry::group(
            "JVM",
            vec![
                ListEntry::value("Java".to_string()),
                ListEntry::value("Kotlin".to_string()),
                ListEntry::group("Functional", owned(&["Scala", "Clojure"])),
            ],
        ),
        Select::separator(""),
        ListEntry::value("COBOL".to_string()).disabled(),
    ]
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let options = match &cli.options {
        Some(path) => PromptOptions::load(path)?,
        None => PromptOptions::default(),
    };

    // Name is remembered across runs
    let io = prompt_io_factory::create_prompt_io_with_history(cli.history.clone());
    let name = Input::new("What's your name?")
        .id("name")
        .min_length(1)
        .options(options.clone())
        .io(io)
        .prompt()?;

    let password = Secret::new("Choose a password")
        .min_length(4)
        .options(options.clone())
        .prompt()?;

    let language = Select::new("Favourite language", languages())
        .search(true)
        .default("Rust".to_string())
        .options(options.clone())
        .prompt()?;

    let subscribe = Confirm::new("Subscribe to the newsletter?")
        .default(false)
        .options(options)
        .prompt()?;

    println!();
    println!("name:      {name}");
    println!("password:  {} characters", password.chars().count());
    println!("language:  {language}");
    println!("subscribe: {}", if subscribe { "yes" } else { "no" });

    Ok(())
}
