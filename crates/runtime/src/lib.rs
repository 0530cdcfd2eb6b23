//! Runtime orchestration for talent-driven battles.
//!
//! This crate wires the talent catalog, persistence and battle sessions into a
//! run: offer talents between stages, activate the player's picks, replay them
//! on resume and dispatch their lifecycle hooks while battles play out.
//!
//! Modules are organized by responsibility:
//! - [`manager`] owns active modifiers, offering and lifecycle dispatch
//! - [`session`] sequences one battle and checks for leaked interceptors
//! - [`repository`] persists talent ids per run and stage
//! - [`auto`] is a small auto pilot for headless play
//! - [`config`] and [`log`] carry the ambient configuration and battle log
pub mod auto;
pub mod config;
pub mod error;
pub mod log;
pub mod manager;
pub mod repository;
pub mod run;
pub mod sampling;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use log::TracingBattleLog;
pub use manager::ModifierManager;
pub use repository::{
    FileModifierRepository, InMemoryModifierRepo, ModifierRepository, RepositoryError,
};
pub use run::RunState;
pub use session::{BattleSession, Outcome, Phase};
