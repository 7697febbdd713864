//! Terminal User Interface components for launchdash.

pub mod chart;
mod help;
pub mod slider;
mod theme;
pub mod widgets;

pub use help::HelpOverlay;
pub use theme::Theme;
