// Library surface for the binary, headless integration tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod animator;
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod data;
pub mod error;
pub mod feedback;
pub mod onboarding;
pub mod palette;
pub mod runtime;
pub mod session;
pub mod tick_driver;
pub mod timers;
pub mod ui;

pub use app::{App, Screen};
pub use session::{Phase, SessionConfig, SessionController, SessionState};
