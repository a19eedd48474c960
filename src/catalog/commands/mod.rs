//! # Command System
//!
//! Maps key presses to command events. Each command decides from a read-only
//! snapshot whether a key is meant for it; the first relevant command wins.
//! Commands never touch the ViewModel: the controller applies their events.

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyModifiers};

pub mod app;
pub mod context;
pub mod events;
pub mod listing;
pub mod navigation;
pub mod picker;
pub mod search;

pub use app::{AppQuitCommand, AppTerminateCommand};
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;
pub use listing::{JumpSelectionCommand, MoveSelectionCommand, OpenPickerCommand, RefreshCommand};
pub use navigation::{BackCommand, EnterListingCommand, OpenProductCommand};
pub use picker::{PickerCancelCommand, PickerConfirmCommand, PickerMoveCommand};
pub use search::{
    FocusSearchCommand, SearchBackspaceCommand, SearchCharCommand, SearchClearCommand,
    SearchLeaveCommand, SearchSubmitCommand,
};

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the current state
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events describing what the key should do
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Key without Ctrl or Alt (Shift only changes the character)
pub(crate) fn is_plain_key(event: &KeyEvent) -> bool {
    !event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Ctrl+C must win over text input
        self.add_command(Box::new(AppTerminateCommand));

        // Text input captures printable keys before any shortcut
        self.add_command(Box::new(SearchSubmitCommand));
        self.add_command(Box::new(SearchLeaveCommand));
        self.add_command(Box::new(SearchClearCommand));
        self.add_command(Box::new(SearchBackspaceCommand));
        self.add_command(Box::new(SearchCharCommand));

        self.add_command(Box::new(PickerMoveCommand));
        self.add_command(Box::new(PickerConfirmCommand));
        self.add_command(Box::new(PickerCancelCommand));

        self.add_command(Box::new(AppQuitCommand));
        self.add_command(Box::new(EnterListingCommand));
        self.add_command(Box::new(OpenProductCommand));
        self.add_command(Box::new(BackCommand));

        self.add_command(Box::new(MoveSelectionCommand));
        self.add_command(Box::new(JumpSelectionCommand));
        self.add_command(Box::new(RefreshCommand));
        self.add_command(Box::new(FocusSearchCommand));
        self.add_command(Box::new(OpenPickerCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Run the first relevant command; no events when none applies
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                return command.execute(event, context);
            }
        }
        Ok(Vec::new())
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::context::test_context;
    use super::*;
    use crate::catalog::events::{Focus, Route};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_should_be_text_while_searching() {
        let registry = CommandRegistry::new();
        let context = test_context(Route::Listing, Focus::Search);

        let events = registry.process_event(key(KeyCode::Char('q')), &context).unwrap();
        assert_eq!(events, vec![CommandEvent::SearchCharRequested { ch: 'q' }]);
    }

    #[test]
    fn q_should_quit_while_browsing() {
        let registry = CommandRegistry::new();
        let context = test_context(Route::Listing, Focus::Browse);

        let events = registry.process_event(key(KeyCode::Char('q')), &context).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn ctrl_c_should_quit_from_search() {
        let registry = CommandRegistry::new();
        let context = test_context(Route::Listing, Focus::Search);
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let events = registry.process_event(event, &context).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn enter_should_depend_on_route_and_focus() {
        let registry = CommandRegistry::new();
        let enter = key(KeyCode::Enter);

        let landing = test_context(Route::Landing, Focus::Browse);
        assert_eq!(
            registry.process_event(enter, &landing).unwrap(),
            vec![CommandEvent::navigate(Route::Listing)]
        );

        let browsing = test_context(Route::Listing, Focus::Browse);
        assert_eq!(
            registry.process_event(enter, &browsing).unwrap(),
            vec![CommandEvent::OpenSelectedRequested]
        );

        let picking = test_context(Route::Listing, Focus::SortPicker);
        assert_eq!(
            registry.process_event(enter, &picking).unwrap(),
            vec![CommandEvent::PickerConfirmRequested]
        );

        let searching = test_context(Route::Listing, Focus::Search);
        assert_eq!(
            registry.process_event(enter, &searching).unwrap(),
            vec![CommandEvent::SearchSubmitRequested]
        );
    }

    #[test]
    fn unbound_key_should_produce_no_events() {
        let registry = CommandRegistry::new();
        let context = test_context(Route::Landing, Focus::Browse);

        let events = registry.process_event(key(KeyCode::F(5)), &context).unwrap();
        assert!(events.is_empty());
    }
}
