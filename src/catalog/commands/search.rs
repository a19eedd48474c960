//! # Search Commands
//!
//! Keys for the search box. While it has focus every printable key is text.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{is_plain_key, Command, CommandContext, CommandEvent};
use crate::catalog::events::Focus;

fn is_searching(context: &CommandContext) -> bool {
    context.state.route.is_listing() && context.state.focus == Focus::Search
}

/// Focus the search box (`/`)
pub struct FocusSearchCommand;

impl Command for FocusSearchCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing() && is_plain_key(event) && event.code == KeyCode::Char('/')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::focus(Focus::Search)])
    }

    fn name(&self) -> &'static str {
        "FocusSearch"
    }
}

/// Type a character
pub struct SearchCharCommand;

impl Command for SearchCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_searching(context) && is_plain_key(event) && matches!(event.code, KeyCode::Char(_))
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::SearchCharRequested { ch }]),
            _ => Ok(vec![CommandEvent::NoAction]),
        }
    }

    fn name(&self) -> &'static str {
        "SearchChar"
    }
}

pub struct SearchBackspaceCommand;

impl Command for SearchBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_searching(context) && event.code == KeyCode::Backspace
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "SearchBackspace"
    }
}

/// Clear the whole input (Ctrl+U)
pub struct SearchClearCommand;

impl Command for SearchClearCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_searching(context)
            && event.code == KeyCode::Char('u')
            && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchClearRequested])
    }

    fn name(&self) -> &'static str {
        "SearchClear"
    }
}

/// Search now (Enter)
pub struct SearchSubmitCommand;

impl Command for SearchSubmitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_searching(context) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SearchSubmitRequested])
    }

    fn name(&self) -> &'static str {
        "SearchSubmit"
    }
}

/// Leave the input (Esc); a pending debounced search still fires
pub struct SearchLeaveCommand;

impl Command for SearchLeaveCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_searching(context) && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::focus(Focus::Browse)])
    }

    fn name(&self) -> &'static str {
        "SearchLeave"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::commands::context::test_context;
    use crate::catalog::events::Route;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn slash_should_focus_search_while_browsing() {
        let context = test_context(Route::Listing, Focus::Browse);
        assert!(FocusSearchCommand.is_relevant(&context, &key(KeyCode::Char('/'))));
    }

    #[test]
    fn shifted_characters_should_be_typed() {
        let context = test_context(Route::Listing, Focus::Search);
        let event = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);

        assert!(SearchCharCommand.is_relevant(&context, &event));
        assert_eq!(
            SearchCharCommand.execute(event, &context).unwrap(),
            vec![CommandEvent::SearchCharRequested { ch: 'A' }]
        );
    }

    #[test]
    fn ctrl_u_should_clear_not_type() {
        let context = test_context(Route::Listing, Focus::Search);
        let event = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert!(SearchClearCommand.is_relevant(&context, &event));
        assert!(!SearchCharCommand.is_relevant(&context, &event));
    }

    #[test]
    fn esc_should_return_focus_to_cards() {
        let context = test_context(Route::Listing, Focus::Search);
        assert_eq!(
            SearchLeaveCommand.execute(key(KeyCode::Esc), &context).unwrap(),
            vec![CommandEvent::focus(Focus::Browse)]
        );
    }

    #[test]
    fn search_commands_should_ignore_browse_focus() {
        let context = test_context(Route::Listing, Focus::Browse);
        assert!(!SearchCharCommand.is_relevant(&context, &key(KeyCode::Char('x'))));
        assert!(!SearchSubmitCommand.is_relevant(&context, &key(KeyCode::Enter)));
    }
}
