//! Runtime orchestration for character progression.
//!
//! This crate wires the pure rules of `progression-core` into a session the
//! host game drives: world-progress globals, the character table, kill-event
//! dispatch with party sharing, the per-tick pass, player feedback, admin
//! commands and save repositories.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] carries player feedback and messages to the authoritative side
//! - [`providers`] are the seams the host plugs its own data into
//! - [`repository`] persists character saves
pub mod admin;
pub mod api;
pub mod config;
pub mod events;
pub mod providers;
pub mod repository;
pub mod session;

pub use admin::{AdminCommand, AdminOutcome};
pub use api::{Result, RuntimeError};
pub use config::{RuntimeConfig, SessionRole};
pub use events::{CollectingFeedback, Feedback, FeedbackSink, OutboundMessage, TracingFeedback};
pub use providers::{PartyRoster, SoloShare, XpShareProvider};
pub use repository::{FileSaveRepository, InMemorySaveRepo, RepositoryError, SaveRepository};
pub use session::{KillEvent, KillReport, Session, SessionBuilder, XpResolution};
