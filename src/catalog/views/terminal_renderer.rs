//! # Terminal Renderer
//!
//! Lays the components out on screen and writes them to a `RenderStream`.
//!
//! ```text
//! row 0        header
//! row 1        filter bar (listing only)
//! row 2        separator
//! rows 3..h-1  body: landing text, product cards or detail page
//! row h-1      status bar
//! ```

use crate::catalog::controllers::{DetailOutcome, DetailState, ListState};
use crate::catalog::events::{Focus, Route, ViewEvent};
use crate::catalog::io::RenderStream;
use crate::catalog::view_models::{ViewModel, ALL_CATEGORIES_LABEL};
use crate::catalog::views::components::{self, Line, SpanStyle};
use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::Write;

const HEADER_ROW: u16 = 0;
const FILTER_ROW: u16 = 1;
const SEPARATOR_ROW: u16 = 2;
const BODY_ROW: u16 = 3;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal (raw mode, alternate screen)
    fn initialize(&mut self) -> Result<()>;

    /// Redraw everything
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Redraw the product cards and the list footer
    fn render_list(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_filter_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Apply a batch of view events with as little drawing as possible
    fn handle_view_events(&mut self, events: &[ViewEvent], view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn status_row(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    /// Rows available to the body
    fn body_height(&self) -> usize {
        self.status_row().saturating_sub(BODY_ROW) as usize
    }

    fn write_line(&mut self, row: u16, line: &Line) -> Result<()> {
        self.render_stream.move_cursor(0, row)?;
        self.render_stream.clear_line()?;

        let line = line.clone().truncated(self.width());
        for span in &line.spans {
            let style = span.style;
            if let Some(color) = style.fg {
                queue_term!(self.render_stream, SetForegroundColor(color))?;
            }
            if style.bold {
                queue_term!(self.render_stream, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue_term!(self.render_stream, SetAttribute(Attribute::Dim))?;
            }
            if style.reverse {
                queue_term!(self.render_stream, SetAttribute(Attribute::Reverse))?;
            }
            queue_term!(self.render_stream, Print(&span.text))?;
            if style != SpanStyle::default() {
                queue_term!(
                    self.render_stream,
                    SetAttribute(Attribute::Reset),
                    ResetColor
                )?;
            }
        }
        Ok(())
    }

    fn write_block(&mut self, first_row: u16, lines: &[Line], rows: usize) -> Result<()> {
        for offset in 0..rows {
            let row = first_row + offset as u16;
            match lines.get(offset) {
                Some(line) => self.write_line(row, line)?,
                None => self.write_line(row, &Line::blank())?,
            }
        }
        Ok(())
    }

    fn render_header(&mut self, view_model: &ViewModel) -> Result<()> {
        let title = match view_model.route() {
            Route::Landing => "Food Product Explorer",
            Route::Listing => "Food Product Explorer · Products",
            Route::Detail(_) => "Food Product Explorer · Product Details",
        };
        self.write_line(
            HEADER_ROW,
            &Line::styled(title, SpanStyle::default().bold()),
        )?;
        let separator = Line::styled("─".repeat(self.width()), SpanStyle::default().dim());
        self.write_line(SEPARATOR_ROW, &separator)
    }

    fn body_lines(&self, view_model: &ViewModel) -> Vec<Line> {
        match view_model.route() {
            Route::Landing => components::landing_lines(),
            Route::Listing => match view_model.list_state() {
                Some(state) => self.list_lines(view_model, state),
                None => Vec::new(),
            },
            Route::Detail(_) => match view_model.detail_model().map(|m| m.state()) {
                Some(DetailState::Resolved(DetailOutcome::Found(details))) => {
                    components::detail_lines(details, self.width())
                }
                Some(DetailState::Resolved(DetailOutcome::NotFound)) => {
                    components::not_found_lines()
                }
                _ => components::detail_loading_lines(),
            },
        }
    }

    fn list_lines(&self, view_model: &ViewModel, state: &ListState) -> Vec<Line> {
        if view_model.focus().is_picker() {
            let title = match view_model.focus() {
                Focus::CategoryPicker => "Category",
                _ => "Sort",
            };
            return components::picker_lines(
                title,
                &view_model.picker_options(),
                view_model.picker_cursor(),
                self.body_height(),
            );
        }

        let items = state.items();
        let cards = view_model.visible_card_count();
        let mut lines = Vec::new();
        for (index, product) in items
            .iter()
            .enumerate()
            .skip(view_model.scroll_offset())
            .take(cards)
        {
            let selected = index == view_model.selection() && view_model.focus() == Focus::Browse;
            lines.extend(components::product_card(product, self.width(), selected));
            lines.push(Line::blank());
        }
        lines.push(components::list_footer(
            state.is_loading(),
            state.error(),
            items.is_empty(),
            state.has_more(),
        ));
        lines
    }

    fn filter_line(&self, view_model: &ViewModel) -> Line {
        let Some(state) = view_model.list_state() else {
            return Line::blank();
        };
        components::filter_bar(
            components::search_input(
                view_model.search_text(),
                view_model.focus() == Focus::Search,
            ),
            components::category_filter(state.query().category.as_deref(), ALL_CATEGORIES_LABEL),
            components::sort_select(state.query().sort),
            self.width(),
        )
    }

    fn status_line(&self, view_model: &ViewModel) -> Line {
        let status = view_model.status_line();
        let mut left = Vec::new();

        if let Some(message) = status.status_message() {
            left.push(message.to_string());
        }
        if let Some(state) = view_model.list_state() {
            if state.is_loading() {
                left.push("Loading...".to_string());
            }
            let mut summary = format!("{} products", state.items().len());
            if state.query().is_searching() {
                summary.push_str(" (search)");
            } else {
                summary.push_str(&format!(" · page {}", state.query().page.saturating_sub(1)));
            }
            if !state.has_more() {
                summary.push_str(" · end");
            }
            left.push(summary);
        }
        if let Some(model) = view_model.detail_model() {
            if model.is_loading() {
                left.push("Loading...".to_string());
            }
        }

        let right = format!("{} @ {}", status.profile_name(), status.base_url());
        let left = left.join(" │ ");
        let gap = self
            .width()
            .saturating_sub(left.chars().count() + right.chars().count())
            .max(1);

        Line::styled(
            format!("{left}{}{right}", " ".repeat(gap)),
            SpanStyle::default().reverse(),
        )
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_header(view_model)?;
        let filter = self.filter_line(view_model);
        self.write_line(FILTER_ROW, &filter)?;

        let body = self.body_lines(view_model);
        let rows = self.body_height();
        self.write_block(BODY_ROW, &body, rows)?;

        let status = self.status_line(view_model);
        self.write_line(self.status_row(), &status)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_list(&mut self, view_model: &ViewModel) -> Result<()> {
        if !view_model.route().is_listing() {
            return Ok(());
        }
        let body = self.body_lines(view_model);
        let rows = self.body_height();
        self.write_block(BODY_ROW, &body, rows)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_filter_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let filter = self.filter_line(view_model);
        self.write_line(FILTER_ROW, &filter)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let status = self.status_line(view_model);
        self.write_line(self.status_row(), &status)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_events(&mut self, events: &[ViewEvent], view_model: &ViewModel) -> Result<()> {
        if events.is_empty() {
            return Ok(());
        }
        if events.contains(&ViewEvent::FullRedrawRequired) {
            return self.render_full(view_model);
        }
        if events.contains(&ViewEvent::ListRedrawRequired) {
            self.render_list(view_model)?;
        }
        if events.contains(&ViewEvent::FilterBarUpdateRequired) {
            self.render_filter_bar(view_model)?;
        }
        // Selection and loading changes show in the status bar too
        self.render_status_bar(view_model)
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::io::{MockRenderStream, RenderCommand};
    use crate::catalog::services::{sample_product, sample_products, InMemoryCatalog};
    use crate::config::ApiProfile;
    use std::sync::Arc;

    fn view_model() -> ViewModel {
        let catalog = InMemoryCatalog::new(vec![sample_product(
            "1",
            "Oat Milk",
            Some("drinks"),
            None,
        )]);
        ViewModel::new(Arc::new(catalog), &ApiProfile::blank("default"))
    }

    #[test]
    fn renderer_should_take_size_from_stream() {
        let renderer = TerminalRenderer::with_render_stream(MockRenderStream::with_size((100, 30)))
            .unwrap();
        assert_eq!(renderer.terminal_size(), (100, 30));
    }

    #[test]
    fn initialize_and_cleanup_should_toggle_terminal_modes() {
        let stream = MockRenderStream::new();
        let history = stream.history();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();

        renderer.initialize().unwrap();
        renderer.cleanup().unwrap();

        let commands = history.commands();
        assert_eq!(commands[0], RenderCommand::EnableRawMode);
        assert!(commands.contains(&RenderCommand::LeaveAlternateScreen));
        assert!(history.has_command(&RenderCommand::DisableRawMode));
    }

    #[test]
    fn landing_should_render_get_started() {
        let stream = MockRenderStream::new();
        let history = stream.history();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();

        renderer.render_full(&view_model()).unwrap();

        let frame = history.frame_text();
        assert!(frame.contains("[ Get Started ]"));
        assert!(frame.contains("default @ http://localhost:8000/api"));
    }

    #[tokio::test]
    async fn listing_should_render_cards_and_filters() {
        let stream = MockRenderStream::new();
        let history = stream.history();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        let mut vm = view_model();
        vm.navigate(Route::Listing);
        vm.settle().await;

        renderer.render_full(&vm).unwrap();

        let frame = history.frame_text();
        assert!(frame.contains("▶ Oat Milk"));
        assert!(frame.contains("Category: All Categories"));
        assert!(frame.contains("Sort: Sort by"));
        assert!(frame.contains("No more products."));
        assert!(frame.contains("1 products"));
    }

    #[tokio::test]
    async fn selected_card_should_be_drawn_at_every_height() {
        let catalog = InMemoryCatalog::new(sample_products(20));
        let mut vm = ViewModel::new(Arc::new(catalog), &ApiProfile::blank("default"));
        vm.navigate(Route::Listing);
        vm.settle().await;

        for height in 20..=48u16 {
            let stream = MockRenderStream::with_size((80, height));
            let history = stream.history();
            let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
            vm.update_terminal_size(80, height);
            vm.select_first();
            for _ in 0..4 {
                vm.move_selection(1);
            }

            renderer.render_full(&vm).unwrap();

            let frame = history.frame_text();
            assert!(frame.contains("▶ Product 5"), "height {height}:\n{frame}");
        }
    }

    #[tokio::test]
    async fn detail_should_render_not_found() {
        let stream = MockRenderStream::new();
        let history = stream.history();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();
        let mut vm = view_model();
        vm.navigate(Route::Detail("404".to_string()));
        vm.settle().await;

        renderer.render_full(&vm).unwrap();

        assert!(history.frame_text().contains("Product Not Found"));
    }

    #[test]
    fn status_only_events_should_not_clear_screen() {
        let stream = MockRenderStream::new();
        let history = stream.history();
        let mut renderer = TerminalRenderer::with_render_stream(stream).unwrap();

        renderer
            .handle_view_events(&[ViewEvent::StatusBarUpdateRequired], &view_model())
            .unwrap();

        assert!(!history.has_command(&RenderCommand::ClearScreen));
        assert!(history.has_command(&RenderCommand::MoveCursor(0, 23)));
    }
}
