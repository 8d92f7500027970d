//! PhantomBuster client: a generic agent lifecycle manager plus one
//! [`PhantomScript`] implementation per LinkedIn scraping operation.

pub mod activities;
pub mod agent;
pub mod company;
pub mod connections;
pub mod messages;
pub mod models;
pub mod profile;
pub mod retry;

mod wire;

pub use agent::{AgentDefinition, PhantomAgent, PhantomScript, RawOutput, DEFAULT_API_BASE};
pub use retry::RetryPolicy;
