pub mod fixed;
pub mod time_based;

pub use fixed::FixedModeRunner;
pub use time_based::TimeBasedModeRunner;
