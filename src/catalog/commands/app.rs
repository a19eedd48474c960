//! # Application Control Commands
//!
//! Commands for controlling the application lifecycle such as quit/terminate operations.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{is_plain_key, Command, CommandContext, CommandEvent};

/// Terminate application (Ctrl+C), from any screen or focus
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Quit with `q` when no text input or picker has focus
pub struct AppQuitCommand;

impl Command for AppQuitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        let focus = context.state.focus;
        matches!(event.code, KeyCode::Char('q'))
            && is_plain_key(event)
            && !focus.captures_text()
            && !focus.is_picker()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppQuit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::commands::context::test_context;
    use crate::catalog::events::{Focus, Route};

    fn create_test_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn app_terminate_should_be_relevant_for_ctrl_c() {
        let context = test_context(Route::Landing, Focus::Browse);
        let event = create_test_key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert!(AppTerminateCommand.is_relevant(&context, &event));
    }

    #[test]
    fn app_terminate_should_not_be_relevant_for_regular_c() {
        let context = test_context(Route::Listing, Focus::Browse);
        let event = create_test_key_event(KeyCode::Char('c'), KeyModifiers::NONE);

        assert!(!AppTerminateCommand.is_relevant(&context, &event));
    }

    #[test]
    fn app_terminate_should_produce_quit_event() {
        let context = test_context(Route::Landing, Focus::Browse);
        let event = create_test_key_event(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let events = AppTerminateCommand.execute(event, &context).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn app_quit_should_be_relevant_on_detail_screen() {
        let context = test_context(Route::Detail("1".into()), Focus::Browse);
        let event = create_test_key_event(KeyCode::Char('q'), KeyModifiers::NONE);

        assert!(AppQuitCommand.is_relevant(&context, &event));
    }

    #[test]
    fn app_quit_should_not_be_relevant_in_picker() {
        let context = test_context(Route::Listing, Focus::CategoryPicker);
        let event = create_test_key_event(KeyCode::Char('q'), KeyModifiers::NONE);

        assert!(!AppQuitCommand.is_relevant(&context, &event));
    }
}
