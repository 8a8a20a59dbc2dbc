//! # avatar-chef
//!
//! Recipe-driven cooking assistant sessions for hosted AI avatars.
//!
//! ## Overview
//!
//! A hosted avatar provider streams a talking persona into a web page. To open
//! a stream, the page needs a short-lived session token, which only a server
//! holding the provider API key can mint. This crate provides that server side:
//!
//! - a recipe book (JSON or YAML) with load-time validation,
//! - a deterministic compiler that turns a recipe into the persona's system
//!   prompt (ingredients, numbered steps, timer annotations),
//! - a session-token client and initiator that send the persona config to the
//!   provider,
//! - an axum router exposing the token route and recipe data,
//! - a client-side session controller over an opaque stream capability.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use avatar_chef::prompt;
//! use avatar_chef::recipe::RecipeBook;
//!
//! # async fn run() -> avatar_chef::Result<()> {
//! let book = RecipeBook::load("data/recipes.json").await?;
//! let recipe = book.require("spaghetti-carbonara")?;
//! println!("{}", prompt::compile(recipe));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`recipe`] | Recipe records, recipe book loading and validation |
//! | [`prompt`] | System prompt compiler and the static Carbonara prompt |
//! | [`persona`] | Persona identity and the provider's `personaConfig` shape |
//! | [`session`] | Session-token client and initiator |
//! | [`stream`] | Client-side chat session over an opaque avatar stream |
//! | [`config`] | Environment-driven configuration |
//! | `server` | axum routes (feature `server`) |

pub mod config;
pub mod persona;
pub mod prompt;
pub mod recipe;
pub mod session;
pub mod stream;

#[cfg(feature = "server")]
pub mod server;

pub use config::AppConfig;
pub use persona::{Persona, PersonaConfig};
pub use prompt::{compile, PromptSource};
pub use recipe::{Recipe, RecipeBook};
pub use session::{SessionInitiator, SessionToken, SessionTokenClient};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
