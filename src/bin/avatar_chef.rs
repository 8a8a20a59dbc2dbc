//! avatar-chef: recipe prompts and avatar session tokens
//!
//! Usage:
//!   avatar-chef prompt [--recipes <path>] [--id <recipeId>] [--static]
//!   avatar-chef validate [--recipes <path>]
//!   avatar-chef session [--recipes <path>] [--id <recipeId>] [--static]
//!   avatar-chef serve [--recipes <path>] [--bind <addr>]

use anyhow::Context;
use avatar_chef::prompt::PromptSource;
use avatar_chef::recipe::RecipeBook;
use avatar_chef::session::{SessionInitiator, SessionParams, SessionTokenClient};
use avatar_chef::AppConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "prompt" => cmd_prompt(&args[2..]).await,
        "validate" => cmd_validate(&args[2..]).await,
        "session" => cmd_session(&args[2..]).await,
        "serve" => cmd_serve(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("avatar-chef {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"avatar-chef: recipe prompts and avatar session tokens

USAGE:
    avatar-chef <COMMAND> [OPTIONS]

COMMANDS:
    prompt      Print the system prompt for a recipe
    validate    Load and validate the recipe book
    session     Request a session token from the provider
    serve       Run the HTTP server (session-token and recipe routes)
    version     Show version information
    help        Show this help message

OPTIONS:
    --recipes <path>    Recipe book (JSON or YAML)
    --id <recipeId>     Recipe to use (default: first in the book)
    --static            Use the hand-written Carbonara prompt
    --bind <addr>       Listen address for `serve`

ENVIRONMENT:
    ANAM_API_KEY                Provider API key (or keyring avatar-chef/anam)
    AVATAR_CHEF_ENDPOINT        Session-token endpoint URL
    AVATAR_CHEF_RECIPES         Recipe book path (default data/recipes.json)
    AVATAR_CHEF_BIND            Listen address (default 127.0.0.1:3000)
    AVATAR_CHEF_DEFAULT_RECIPE  Default recipe id
    AVATAR_CHEF_PROMPT_SOURCE   recipe | static
    RUST_LOG                    Log filter (default info)"#
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn load_config(args: &[String]) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("reading configuration")?;
    if let Some(path) = flag_value(args, "--recipes") {
        config = config.with_recipes_path(path);
    }
    if let Some(id) = flag_value(args, "--id") {
        config = config.with_default_recipe(id);
    }
    if let Some(bind) = flag_value(args, "--bind") {
        config = config.with_bind(bind);
    }
    if has_flag(args, "--static") {
        config = config.with_prompt_source(PromptSource::Static);
    }
    Ok(config)
}

async fn load_book(config: &AppConfig) -> anyhow::Result<RecipeBook> {
    RecipeBook::load(&config.recipes_path)
        .await
        .with_context(|| format!("loading {}", config.recipes_path.display()))
}

async fn cmd_prompt(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let book = load_book(&config).await?;
    let recipe = book.resolve(config.default_recipe.as_deref())?;
    let options = avatar_chef::prompt::PromptOptions::default()
        .with_assistant_name(config.persona.name.clone());
    println!("{}", config.prompt_source.render(recipe, &options));
    Ok(())
}

async fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let book = load_book(&config).await?;
    println!("Recipe book: {}", config.recipes_path.display());
    for recipe in book.iter() {
        println!(
            "  ✓ {} ({}): {} ingredients, {} steps",
            recipe.recipe_id,
            recipe.title,
            recipe.ingredients.len(),
            recipe.steps.len()
        );
    }
    println!("{} recipe(s) valid", book.len());
    Ok(())
}

async fn cmd_session(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let book = Arc::new(load_book(&config).await?);
    let client = SessionTokenClient::from_config(&config)?;
    let initiator = SessionInitiator::new(book, Arc::new(client))
        .with_persona(config.persona.clone())
        .with_default_recipe(config.default_recipe.clone())
        .with_default_source(config.prompt_source);
    let token = initiator.initiate(&SessionParams::default()).await?;
    println!("{}", token.as_str());
    Ok(())
}

#[cfg(feature = "server")]
async fn cmd_serve(args: &[String]) -> anyhow::Result<()> {
    let config = load_config(args)?;
    avatar_chef::server::serve(&config).await?;
    Ok(())
}

#[cfg(not(feature = "server"))]
async fn cmd_serve(_args: &[String]) -> anyhow::Result<()> {
    anyhow::bail!("this build was compiled without the `server` feature")
}
