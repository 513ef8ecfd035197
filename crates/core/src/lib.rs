//! # Medicine Finder Core
//!
//! Core logic for looking up a medicine and its alternatives:
//! - Formatting the instruction and response schema sent to the AI service
//! - Validating the structured answer into a [`SearchResult`]
//! - The per-session search state machine and the view it implies
//!
//! **No API concerns**: HTTP servers, OpenAPI documents and terminal
//! rendering belong in `api-rest`, `api-shared` or `medfind-cli`.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod finder;
pub mod gemini;
pub mod model;
pub mod prompt;
pub mod search;
pub mod validation;
pub mod view;

pub use client::{ClientError, GenerativeClient};
pub use config::FinderConfig;
pub use error::{FinderError, FinderResult};
pub use finder::MedicineFinder;
pub use gemini::GeminiClient;
pub use model::{CategoryKind, Medicine, MedicineCategory, MedicineQuery, SearchResult};
pub use prompt::AlternativesRequest;
pub use search::{SearchSession, SearchState, SearchTicket};
pub use view::View;
