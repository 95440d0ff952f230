//! One module per subcommand.

mod completions;
mod history;
mod note;
mod process;
mod remove;
mod usage;

pub use completions::run_completions;
pub use history::run_history;
pub use note::{run_note, NoteAction};
pub use process::run_process;
pub use remove::run_remove;
pub use usage::run_usage;
