//! Confirmation before destructive commands
//!
//! [`Database::execute`](crate::Database::execute) asks a [`Confirm`]
//! before running `delete` or `drop_table`. A declined prompt cancels the
//! command without touching any data.

/// Something that can answer a yes/no question.
pub trait Confirm {
    /// Returns true to go ahead.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Approves everything. For scripts and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Prompt shown before an action.
pub fn prompt_for(action: &str) -> String {
    format!("Are you sure you want to perform \"{}\"? [y/n]: ", action)
}

/// Interprets a typed answer. Only `y` (any case, surrounding whitespace
/// ignored) counts as yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(confirm: &mut dyn Confirm) -> bool {
        confirm.confirm("go?")
    }

    #[test]
    fn test_closure_confirm() {
        let mut asked = Vec::new();
        let mut decline = |prompt: &str| {
            asked.push(prompt.to_string());
            false
        };
        assert!(!ask(&mut decline));
        assert_eq!(asked, vec!["go?"]);
        assert!(ask(&mut AlwaysConfirm));
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" Y \n"));
        assert!(!is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_prompt_for() {
        assert_eq!(
            prompt_for("drop table"),
            "Are you sure you want to perform \"drop table\"? [y/n]: "
        );
    }
}
