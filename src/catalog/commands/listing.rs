//! # Listing Commands
//!
//! Keys for the product list while the cards have focus.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{is_plain_key, Command, CommandContext, CommandEvent};
use crate::catalog::events::Focus;

/// Move the selection: `j`/`k`, arrows, PageUp/PageDown
pub struct MoveSelectionCommand;

impl Command for MoveSelectionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing()
            && is_plain_key(event)
            && matches!(
                event.code,
                KeyCode::Char('j')
                    | KeyCode::Char('k')
                    | KeyCode::Down
                    | KeyCode::Up
                    | KeyCode::PageDown
                    | KeyCode::PageUp
            )
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let page = context.state.visible_cards.max(1) as isize;
        let delta = match event.code {
            KeyCode::Char('j') | KeyCode::Down => 1,
            KeyCode::Char('k') | KeyCode::Up => -1,
            KeyCode::PageDown => page,
            KeyCode::PageUp => -page,
            _ => return Ok(vec![CommandEvent::NoAction]),
        };
        Ok(vec![CommandEvent::SelectionMoveRequested { delta }])
    }

    fn name(&self) -> &'static str {
        "MoveSelection"
    }
}

/// Jump to the first (`g`, Home) or last (`G`, End) card; the end also asks for more
pub struct JumpSelectionCommand;

impl Command for JumpSelectionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing()
            && is_plain_key(event)
            && matches!(
                event.code,
                KeyCode::Char('g') | KeyCode::Char('G') | KeyCode::Home | KeyCode::End
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char('G') | KeyCode::End => Ok(vec![
                CommandEvent::SelectionJumpRequested { to_end: true },
                CommandEvent::LoadMoreRequested,
            ]),
            _ => Ok(vec![CommandEvent::SelectionJumpRequested { to_end: false }]),
        }
    }

    fn name(&self) -> &'static str {
        "JumpSelection"
    }
}

/// Refetch the list (`r`)
pub struct RefreshCommand;

impl Command for RefreshCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing() && is_plain_key(event) && event.code == KeyCode::Char('r')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::RefreshRequested])
    }

    fn name(&self) -> &'static str {
        "Refresh"
    }
}

/// Open the category (`c`) or sort (`s`) picker
pub struct OpenPickerCommand;

impl Command for OpenPickerCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing()
            && is_plain_key(event)
            && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('s'))
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let focus = match event.code {
            KeyCode::Char('c') => Focus::CategoryPicker,
            _ => Focus::SortPicker,
        };
        Ok(vec![CommandEvent::focus(focus)])
    }

    fn name(&self) -> &'static str {
        "OpenPicker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::commands::context::test_context;
    use crate::catalog::events::Route;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn j_should_move_selection_down() {
        let context = test_context(Route::Listing, Focus::Browse);
        let events = MoveSelectionCommand
            .execute(key(KeyCode::Char('j')), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SelectionMoveRequested { delta: 1 }]);
    }

    #[test]
    fn page_up_should_move_by_visible_cards() {
        let context = test_context(Route::Listing, Focus::Browse);
        let events = MoveSelectionCommand
            .execute(key(KeyCode::PageUp), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SelectionMoveRequested { delta: -5 }]);
    }

    #[test]
    fn move_selection_should_not_be_relevant_on_landing() {
        let context = test_context(Route::Landing, Focus::Browse);
        assert!(!MoveSelectionCommand.is_relevant(&context, &key(KeyCode::Down)));
    }

    #[test]
    fn end_should_jump_and_load_more() {
        let context = test_context(Route::Listing, Focus::Browse);
        let events = JumpSelectionCommand
            .execute(key(KeyCode::End), &context)
            .unwrap();
        assert_eq!(
            events,
            vec![
                CommandEvent::SelectionJumpRequested { to_end: true },
                CommandEvent::LoadMoreRequested
            ]
        );
    }

    #[test]
    fn shifted_g_should_be_relevant() {
        let context = test_context(Route::Listing, Focus::Browse);
        let event = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert!(JumpSelectionCommand.is_relevant(&context, &event));
    }

    #[test]
    fn c_and_s_should_open_pickers() {
        let context = test_context(Route::Listing, Focus::Browse);
        assert_eq!(
            OpenPickerCommand
                .execute(key(KeyCode::Char('c')), &context)
                .unwrap(),
            vec![CommandEvent::focus(Focus::CategoryPicker)]
        );
        assert_eq!(
            OpenPickerCommand
                .execute(key(KeyCode::Char('s')), &context)
                .unwrap(),
            vec![CommandEvent::focus(Focus::SortPicker)]
        );
    }
}
