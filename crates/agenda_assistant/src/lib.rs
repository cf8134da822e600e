// --- File: crates/agenda_assistant/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod gateway;
pub mod handlers;
pub mod ics;
pub mod language;
pub mod localization;
pub mod logic;
#[cfg(test)]
mod parsing_proptest;
pub mod prompts;
pub mod routes;
pub mod understanding;
