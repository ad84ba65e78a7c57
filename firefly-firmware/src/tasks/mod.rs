// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Tasks kommunizieren über ein Embassy Signal (Taster → Swarm).

pub mod shutdown;
pub mod swarm;

// Re-export Tasks für einfachen Import
pub use shutdown::shutdown_button_task;
pub use swarm::swarm_task;
