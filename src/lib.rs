
// re-exports
pub use log::{self, Level as LogLevel};

// mods
mod value;
pub use value::*;

mod once;
pub use once::*;
