pub mod icons;
pub mod progress;
pub mod prompt;
pub mod table;

pub use progress::{LoadingSpinner, with_spinner};
