//! # Picker Commands
//!
//! Keys for the category and sort pickers.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{is_plain_key, Command, CommandContext, CommandEvent};
use crate::catalog::events::Focus;

fn is_picking(context: &CommandContext) -> bool {
    context.state.route.is_listing() && context.state.focus.is_picker()
}

/// Move the highlight (`j`/`k`, arrows)
pub struct PickerMoveCommand;

impl Command for PickerMoveCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_picking(context)
            && is_plain_key(event)
            && matches!(
                event.code,
                KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Down | KeyCode::Up
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let delta = match event.code {
            KeyCode::Char('j') | KeyCode::Down => 1,
            _ => -1,
        };
        Ok(vec![CommandEvent::PickerMoveRequested { delta }])
    }

    fn name(&self) -> &'static str {
        "PickerMove"
    }
}

/// Apply the highlighted entry (Enter)
pub struct PickerConfirmCommand;

impl Command for PickerConfirmCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_picking(context) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::PickerConfirmRequested])
    }

    fn name(&self) -> &'static str {
        "PickerConfirm"
    }
}

/// Close the picker without changing anything (Esc)
pub struct PickerCancelCommand;

impl Command for PickerCancelCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_picking(context) && event.code == KeyCode::Esc
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::focus(Focus::Browse)])
    }

    fn name(&self) -> &'static str {
        "PickerCancel"
    }
}
