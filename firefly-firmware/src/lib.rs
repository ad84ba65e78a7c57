// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von firefly-core
pub use firefly_core::{
    Clock, Firefly, FireflyConfig, FireflyId, FireflyOutput, OutputError, PollReport, Swarm,
    SwarmError,
};

// Embassy Signal-Typen
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

// ============================================================================
// Type-Aliase für Signal-Typen
// ============================================================================

/// Signal zum Abschalten des Schwarms (Shutdown-Taster → Swarm Task)
///
/// CriticalSectionRawMutex, da der Taster-Task und der Swarm-Task
/// unabhängig voneinander laufen.
pub type ShutdownSignal = Signal<CriticalSectionRawMutex, ()>;
