//! JSON configuration of the command-line tools.

pub mod inspect;

pub use inspect::{load_config, InspectConfig, InspectOutputConfig};
