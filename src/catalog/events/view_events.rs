//! # View Events
//!
//! Events related to view updates and user input.
//! These events drive UI refreshing and handle user interactions.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Events emitted when view updates are needed
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Full screen redraw required (route change, terminal resize, new data)
    FullRedrawRequired,

    /// Product list area needs redrawing (selection or scroll moved)
    ListRedrawRequired,

    /// Filter bar (search input, category, sort) needs redrawing
    FilterBarUpdateRequired,

    /// Status bar needs updating
    StatusBarUpdateRequired,
}

/// Input events from user or system
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Key pressed
    KeyPressed(KeyEvent),

    /// Terminal resized
    TerminalResized { width: u16, height: u16 },
}

impl InputEvent {
    /// Translate a terminal event; key releases and mouse events are dropped
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::KeyPressed(key)),
            Event::Resize(width, height) => Some(Self::TerminalResized { width, height }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn input_event_key_pressed_should_carry_key_data() {
        let key_event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty());
        let event = InputEvent::KeyPressed(key_event);

        match event {
            InputEvent::KeyPressed(k) => {
                assert_eq!(k.code, KeyCode::Char('a'));
            }
            _ => panic!("Expected KeyPressed event"),
        }
    }

    #[test]
    fn from_terminal_should_drop_key_releases() {
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty());
        release.kind = KeyEventKind::Release;
        assert_eq!(InputEvent::from_terminal(Event::Key(release)), None);
        assert_eq!(
            InputEvent::from_terminal(Event::Resize(100, 30)),
            Some(InputEvent::TerminalResized {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn input_event_terminal_resized_should_carry_size_data() {
        let event = InputEvent::TerminalResized {
            width: 80,
            height: 24,
        };

        match event {
            InputEvent::TerminalResized { width, height } => {
                assert_eq!(width, 80);
                assert_eq!(height, 24);
            }
            _ => panic!("Expected TerminalResized event"),
        }
    }
}
