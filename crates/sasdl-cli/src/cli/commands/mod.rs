//! CLI command handlers, one file per command.

mod checksum;
mod completions;
mod fetch;
mod kinds;
mod man;
mod progress;
mod resolve;

pub use checksum::run_checksum;
pub use completions::run_completions;
pub use fetch::run_fetch;
pub use kinds::run_kinds;
pub use man::run_man;
pub use resolve::run_resolve;
