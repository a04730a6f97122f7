//! Code review gateway: relays code snippets to Gemini for review and
//! exposes connectivity checks for the Supabase backend.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod prompts;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
