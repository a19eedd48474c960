//! # Application Controller
//!
//! Owns the event loop. Key presses go through the command registry, the
//! resulting command events are applied to the ViewModel, and the view
//! events it emits decide what the renderer redraws. Between key presses the
//! loop ticks the ViewModel so fetch results and debounced searches land.

use crate::catalog::{
    commands::{CommandContext, CommandEvent, CommandRegistry, ViewModelSnapshot},
    events::InputEvent,
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    services::{CatalogApi, HttpCatalogClient},
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use crate::config::ApiProfile;
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long one loop turn waits for terminal input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<Stdout>> {
    /// Controller on the real terminal talking HTTP to the profile's API
    pub fn new(profile: &ApiProfile) -> Result<Self> {
        let client = HttpCatalogClient::new(profile)?;
        Self::with_io_streams(
            Arc::new(client),
            profile,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create new application controller with injected I/O streams
    pub fn with_io_streams(
        api: Arc<dyn CatalogApi>,
        profile: &ApiProfile,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let mut view_model = ViewModel::new(api, profile);

        // Synchronize view model with actual terminal size
        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);
        view_model.collect_pending_view_events();

        tracing::debug!(
            "Controller created for profile '{}' ({})",
            profile.name,
            profile.base_url
        );

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    /// Run the main application loop until a quit is requested
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.view_renderer.render_full(&self.view_model)?;

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        if let Err(e) = self.view_renderer.cleanup() {
            tracing::error!("Failed to restore terminal: {}", e);
        }
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                if let Some(input) = InputEvent::from_terminal(event) {
                    self.handle_input(input)?;
                }
            }

            if !self.should_quit {
                self.tick(Instant::now());
                self.render_pending()?;
            }

            // Give spawned fetches a chance to run on a single-threaded runtime
            tokio::task::yield_now().await;
        }
        tracing::info!("Quit requested, leaving event loop");
        Ok(())
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Result<()> {
        match input {
            InputEvent::KeyPressed(key_event) => self.process_key_event(key_event),
            InputEvent::TerminalResized { width, height } => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
                self.view_renderer.update_size(width, height);
                self.view_model.update_terminal_size(width, height);
                Ok(())
            }
        }
    }

    /// Map a key press to command events and apply them
    pub fn process_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        let context = CommandContext::new(ViewModelSnapshot::from_view_model(&self.view_model));
        let events = self.command_registry.process_event(key_event, &context)?;
        if events.is_empty() {
            tracing::trace!("No command for key {:?}", key_event.code);
            return Ok(());
        }

        tracing::debug!("Command events generated: {:?}", events);
        let now = Instant::now();
        for event in events {
            self.apply_command_event(event, now);
        }
        Ok(())
    }

    fn apply_command_event(&mut self, event: CommandEvent, now: Instant) {
        let vm = &mut self.view_model;
        match event {
            CommandEvent::QuitRequested => self.should_quit = true,
            CommandEvent::NavigateRequested { route } => vm.navigate(route),
            CommandEvent::OpenSelectedRequested => vm.open_selected(),
            CommandEvent::BackRequested => vm.go_back(),
            CommandEvent::SelectionMoveRequested { delta } => vm.move_selection(delta),
            CommandEvent::SelectionJumpRequested { to_end: true } => vm.select_last(),
            CommandEvent::SelectionJumpRequested { to_end: false } => vm.select_first(),
            CommandEvent::LoadMoreRequested => vm.load_more(),
            CommandEvent::RefreshRequested => vm.refresh(),
            CommandEvent::FocusRequested { focus } => vm.set_focus(focus),
            CommandEvent::SearchCharRequested { ch } => vm.search_push(ch, now),
            CommandEvent::SearchBackspaceRequested => vm.search_backspace(now),
            CommandEvent::SearchClearRequested => vm.search_clear(now),
            CommandEvent::SearchSubmitRequested => vm.search_submit(),
            CommandEvent::PickerMoveRequested { delta } => vm.picker_move(delta),
            CommandEvent::PickerConfirmRequested => vm.picker_confirm(),
            CommandEvent::NoAction => {}
        }
    }

    /// Apply arrived responses and due searches
    pub fn tick(&mut self, now: Instant) -> bool {
        self.view_model.tick_at(now)
    }

    /// Draw whatever the ViewModel asked for since the last call
    pub fn render_pending(&mut self) -> Result<()> {
        let events = self.view_model.collect_pending_view_events();
        self.view_renderer
            .handle_view_events(&events, &self.view_model)
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn view_model_mut(&mut self) -> &mut ViewModel {
        &mut self.view_model
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
