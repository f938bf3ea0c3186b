// src/lib.rs — Library root for Draftmill

pub mod cli;
pub mod extract;
pub mod infra;
pub mod optimizer;
pub mod orchestrator;
pub mod patterns;
pub mod provider;
pub mod util;
