//! Interactive chat loop

use docqa_core::{CompletionProvider, ConversationSession, Embedder, Result, VectorIndex};
use docqa_rag::RagEngine;

use crate::ui;

/// What the user asked the loop to do
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Help,
    Ask(&'a str),
    Empty,
}

/// Classify one line of input
pub fn parse_command(input: &str) -> Command<'_> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }
    match trimmed.to_lowercase().as_str() {
        "exit" | "quit" => Command::Quit,
        "help" => Command::Help,
        _ => Command::Ask(trimmed),
    }
}

/// Run the interactive loop until the user exits or input ends.
///
/// The loop owns the [`ConversationSession`] and appends both sides of
/// every successful exchange; the engine only reads it, and only when
/// `with_history` is set. Failures render inline and the session keeps
/// going.
pub async fn run_chat<E, I, C>(engine: &RagEngine<E, I, C>, with_history: bool) -> Result<()>
where
    E: Embedder,
    I: VectorIndex,
    C: CompletionProvider,
{
    let mut session = ConversationSession::new();

    loop {
        let Some(input) = ui::read_input()? else {
            break;
        };

        let question = match parse_command(&input) {
            Command::Empty => continue,
            Command::Quit => {
                ui::print_goodbye();
                break;
            }
            Command::Help => {
                ui::print_help();
                continue;
            }
            Command::Ask(question) => question,
        };

        let result = if with_history {
            engine.answer_with_session(question, &session).await
        } else {
            engine.answer(question).await
        };

        match result {
            Ok(answer) => {
                ui::print_answer(&answer);
                session.push_user(question);
                session.push_assistant(&answer);
            }
            Err(err) => {
                tracing::warn!(error = %err, "answer failed");
                ui::print_error(&err);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_dispatch() {
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("  QUIT  "), Command::Quit);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(
            parse_command("When was Tesla founded?"),
            Command::Ask("When was Tesla founded?")
        );
    }

    #[test]
    fn test_questions_are_not_swallowed_by_keywords() {
        assert_eq!(
            parse_command("help me understand page 3"),
            Command::Ask("help me understand page 3")
        );
    }
}
