//! Yes/no answer parsing for the confirmation prompt.

/// Answer given at the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Reject,
}

/// Map one line of user input to a [`Choice`].
///
/// Only the exact single characters `Y`, `y`, `N` and `n` are answers.
/// Everything else (including surrounding whitespace or full words) is
/// `None` and must re-prompt.
pub fn parse_choice(input: &str) -> Option<Choice> {
    match input {
        "Y" | "y" => Some(Choice::Accept),
        "N" | "n" => Some(Choice::Reject),
        _ => None,
    }
}
