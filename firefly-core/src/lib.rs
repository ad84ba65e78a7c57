//! Firefly Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, Pure Functions und die Glühwürmchen-Zustandsmaschine.

#![no_std]

pub mod firefly;
pub mod logic;
pub mod swarm;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use firefly::Firefly;
pub use logic::{draw_dark_time, elapsed_since};
pub use swarm::{PollReport, Swarm, SwarmError};
pub use traits::{Clock, FireflyOutput, OutputError};
pub use types::{
    ConfigError, FireflyConfig, FireflyId, FireflyState, LIGHT_TIME, MAX_DARK_TIME, MIN_DARK_TIME,
};
