mod render;

use clap::Parser;
use render::TerminalRenderer;
use solace_content::{catalog::ResourceCatalog, ContentRetriever};
use solace_core::{
    CompanionConfig, MoodClassifier, Renderer, Role, SessionState, TextGenerator,
};
use solace_dialogue::DialogueEngine;
use solace_generative::{GeminiClient, GenerativeLayer};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Solace — a mood-aware supportive companion", long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "solace.toml")]
    config: String,

    /// Serve the HTTP chat gateway instead of the terminal shell
    #[arg(long)]
    serve: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
    let args = Args::parse();

    let config = CompanionConfig::load_or_default(&args.config);

    let catalog = Arc::new(ResourceCatalog::load(
        &config.catalog.quotes_path,
        &config.catalog.media_path,
        &config.catalog.exercises_path,
    ));

    let generator: Option<Arc<dyn TextGenerator>> = GeminiClient::from_env(&config.generative)
        .map(|client| Arc::new(client) as Arc<dyn TextGenerator>);
    if generator.is_some() {
        info!("Generative service configured ({})", config.generative.model);
    }

    let engine = DialogueEngine::new(
        MoodClassifier::new(),
        ContentRetriever::new(catalog),
        GenerativeLayer::new(generator, &config.generative),
    );

    if args.serve {
        return solace_gateway::serve(
            Arc::new(engine),
            &config.gateway.host,
            config.gateway.port,
        )
        .await;
    }

    run_repl(engine).await
}

async fn run_repl(engine: DialogueEngine) -> anyhow::Result<()> {
    let mut renderer = TerminalRenderer;
    let mut state = SessionState::new();

    println!("Solace Companion ✨  Type 'quit' to exit, 'role' to start over.");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        if state.role.is_none() {
            let Some(role) = prompt_role(&stdin, &mut input)? else {
                break;
            };
            for entry in engine.select_role(&mut state, role) {
                renderer.display_entry(&entry);
            }
            continue;
        }

        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let trimmed = input.trim().to_string();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        // A bare number picks one of the offered quick actions.
        let entries = match offered_index(&state, &trimmed) {
            Some(action) => engine.select_quick_action(&mut state, action).await,
            None => engine.submit_text(&mut state, &trimmed).await,
        };
        for entry in &entries {
            renderer.display_entry(entry);
        }
        if let Some(actions) = state.offered_actions() {
            renderer.offer_quick_actions(&actions);
        }
    }

    Ok(())
}

fn offered_index(state: &SessionState, input: &str) -> Option<solace_core::QuickAction> {
    let actions = state.offered_actions()?;
    let index: usize = input.parse().ok()?;
    actions.get(index.checked_sub(1)?).copied()
}

/// Show the role menu and read a choice. Returns None on EOF.
fn prompt_role(stdin: &io::Stdin, input: &mut String) -> anyhow::Result<Option<Role>> {
    println!("\nHello! To offer the best advice, tell me who you are:");
    for (i, role) in Role::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, role.label());
    }
    loop {
        print!("choice> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.read_line(input)? == 0 {
            return Ok(None);
        }
        let trimmed = input.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Ok(None);
        }
        match trimmed.parse::<usize>().ok().and_then(|n| {
            n.checked_sub(1).and_then(|i| Role::ALL.get(i).copied())
        }) {
            Some(role) => return Ok(Some(role)),
            None => println!("Please pick 1, 2, or 3."),
        }
    }
}
