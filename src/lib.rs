pub mod argv;
pub mod cli;
pub mod cmdline;
pub mod console;
pub mod encoding;
pub mod error;
pub mod launcher;
pub mod log;

pub use argv::{ArgumentSource, Arguments};
pub use cmdline::CommandLine;
pub use error::{EncodingError, Error, Result};
pub use launcher::LaunchPlan;
