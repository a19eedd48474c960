//! # Navigation Commands
//!
//! Moving between the landing, listing and detail screens.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{is_plain_key, Command, CommandContext, CommandEvent};
use crate::catalog::events::{Focus, Route};

/// "Get started" on the landing screen (Enter or Space)
pub struct EnterListingCommand;

impl Command for EnterListingCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.route == Route::Landing
            && is_plain_key(event)
            && matches!(event.code, KeyCode::Enter | KeyCode::Char(' '))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::navigate(Route::Listing)])
    }

    fn name(&self) -> &'static str {
        "EnterListing"
    }
}

/// Open the selected product card (Enter)
pub struct OpenProductCommand;

impl Command for OpenProductCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.state.is_browsing() && is_plain_key(event) && event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        if context.state.item_count == 0 {
            return Ok(vec![CommandEvent::NoAction]);
        }
        Ok(vec![CommandEvent::OpenSelectedRequested])
    }

    fn name(&self) -> &'static str {
        "OpenProduct"
    }
}

/// Go up one screen: Esc, `b` or Backspace on the detail screen, Esc on the listing
pub struct BackCommand;

impl Command for BackCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if !is_plain_key(event) {
            return false;
        }
        match &context.state.route {
            Route::Detail(_) => matches!(
                event.code,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b')
            ),
            Route::Listing => context.state.focus == Focus::Browse && event.code == KeyCode::Esc,
            Route::Landing => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::BackRequested])
    }

    fn name(&self) -> &'static str {
        "Back"
    }
}
