//! Interactive chat loop and terminal rendering for docqa

mod chat;
mod ui;

pub use chat::{Command, parse_command, run_chat};
pub use ui::{display_banner, print_answer, print_error, print_help};
