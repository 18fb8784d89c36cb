// Module declarations
pub mod carousel;
pub mod event;
pub mod fade;
pub mod filter;
pub mod grid;
mod help_window;
pub mod layout;
pub mod page;
mod render;
mod runner;
pub mod scroll;
pub mod signal;
mod theme;
pub mod tween;

// Re-export public API
pub use filter::{filter_versions, MatchMode};
pub use page::PageConfig;
pub use runner::Runner;
pub use theme::Theme;
