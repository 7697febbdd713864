//! Terminal dashboard: application state and the TUI event loop.
//!
//! The event loop owns the current control values. Each key press that
//! changes a control re-renders the charts that depend on it.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{debug, info};

use crate::dashboard::{ChartSpec, Controls, Dashboard, Renderable, SiteSelection};
use crate::ui::{
    chart::ChartView,
    slider::{SliderState, SliderView},
    widgets::{SiteList, StatusBar, TitleBar},
    HelpOverlay, Theme,
};

/// Which panel is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Sites,
    Payload,
}

impl FocusedPanel {
    fn next(self) -> Self {
        match self {
            FocusedPanel::Sites => FocusedPanel::Payload,
            FocusedPanel::Payload => FocusedPanel::Sites,
        }
    }

    fn prev(self) -> Self {
        // Two panels: backwards is the same as forwards
        self.next()
    }
}

/// Application state
pub struct App {
    theme: Theme,

    // Data
    dashboard: Dashboard,

    // Controls
    selected_site: usize,
    site_filter: String,
    filtering: bool,
    slider: SliderState,

    // Rendered charts, refreshed when their inputs change
    pie: ChartSpec,
    scatter: ChartSpec,

    // UI State
    focused: FocusedPanel,
    show_help: bool,

    // Exit flag
    should_quit: bool,
}

impl App {
    /// Create a new App instance with every control at its default value
    pub fn new(dashboard: Dashboard) -> Self {
        let slider = SliderState::new(&dashboard.layout().payload_slider);
        let controls = dashboard.default_controls();
        let pie = dashboard.pie().render(&controls);
        let scatter = dashboard.scatter().render(&controls);

        App {
            theme: Theme::default(),
            dashboard,
            selected_site: 0,
            site_filter: String::new(),
            filtering: false,
            slider,
            pie,
            scatter,
            focused: FocusedPanel::Sites,
            show_help: false,
            should_quit: false,
        }
    }

    /// Current control values as the handlers see them
    pub fn controls(&self) -> Controls {
        let value = self
            .dashboard
            .layout()
            .site_dropdown
            .options
            .get(self.selected_site)
            .map(|o| o.value.as_str());
        Controls::new(SiteSelection::from_value(value), self.slider.range())
    }

    /// Site dropdown changed: both charts depend on it
    fn on_site_changed(&mut self) {
        let controls = self.controls();
        debug!(site = %controls.site, "site changed");
        self.pie = self.dashboard.pie().render(&controls);
        self.scatter = self.dashboard.scatter().render(&controls);
    }

    /// Payload slider changed: only the scatter chart depends on it
    fn on_payload_changed(&mut self) {
        let controls = self.controls();
        debug!(low = controls.payload.low, high = controls.payload.high, "payload range changed");
        self.scatter = self.dashboard.scatter().render(&controls);
    }

    /// Dropdown options that pass the current site filter
    fn visible_sites(&self) -> Vec<usize> {
        self.dashboard.layout().site_dropdown.matching(&self.site_filter)
    }

    /// Filter text changed: keep the selection on a visible site
    fn on_filter_changed(&mut self) {
        let visible = self.visible_sites();
        if visible.contains(&self.selected_site) {
            return;
        }
        if let Some(&first) = visible.first() {
            self.selected_site = first;
            self.on_site_changed();
        }
    }

    /// Keys typed while the site search is open
    fn handle_filter_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => {
                self.site_filter.push(c);
                self.on_filter_changed();
            }
            KeyCode::Backspace => {
                self.site_filter.pop();
                self.on_filter_changed();
            }
            KeyCode::Enter => self.filtering = false,
            KeyCode::Esc => {
                self.filtering = false;
                self.site_filter.clear();
            }
            KeyCode::Down | KeyCode::Up => self.handle_site_navigation(key),
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) {
        // The site search swallows every key until it is closed
        if self.filtering {
            self.handle_filter_input(key);
            return;
        }

        // Global shortcuts
        match key {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Char('h') if self.show_help || self.focused != FocusedPanel::Payload => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            KeyCode::Tab => {
                self.focused = self.focused.next();
                return;
            }
            KeyCode::BackTab => {
                self.focused = self.focused.prev();
                return;
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return;
        }

        // Panel-specific navigation
        match self.focused {
            FocusedPanel::Sites => self.handle_site_navigation(key),
            FocusedPanel::Payload => self.handle_payload_navigation(key),
        }
    }

    fn handle_site_navigation(&mut self, key: KeyCode) {
        let visible = self.visible_sites();
        let count = visible.len();
        if count == 0 && key != KeyCode::Char('/') {
            return;
        }
        let pos = visible
            .iter()
            .position(|&i| i == self.selected_site)
            .unwrap_or(0);
        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_site = visible[(pos + 1) % count];
                self.on_site_changed();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_site = visible[pos.checked_sub(1).unwrap_or(count - 1)];
                self.on_site_changed();
            }
            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                self.focused = FocusedPanel::Payload;
            }
            _ => {}
        }
    }

    fn handle_payload_navigation(&mut self, key: KeyCode) {
        let changed = match key {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Up | KeyCode::Char('k') => {
                self.slider.increase()
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Down | KeyCode::Char('j') => {
                self.slider.decrease()
            }
            KeyCode::Char(' ') => {
                self.slider.toggle_handle();
                false
            }
            KeyCode::Char('0') => self.slider.reset(),
            KeyCode::Esc => {
                self.focused = FocusedPanel::Sites;
                false
            }
            _ => false,
        };
        if changed {
            self.on_payload_changed();
        }
    }

    /// Number of points currently plotted on the scatter chart
    fn shown_launches(&self) -> usize {
        match &self.scatter {
            ChartSpec::Scatter(scatter) => scatter.points().count(),
            ChartSpec::Pie(_) => 0,
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let size = frame.area();
        let layout = self.dashboard.layout();

        // Main layout: title, body, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(10),   // Body
                Constraint::Length(2), // Status bar
            ])
            .split(size);

        // Body layout: controls (left) and charts (right)
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(34), // Controls
                Constraint::Min(40),    // Charts
            ])
            .split(main_chunks[1]);

        let control_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Sites
                Constraint::Length(5), // Payload slider
            ])
            .split(body_chunks[0]);

        let chart_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45), // Pie
                Constraint::Percentage(55), // Scatter
            ])
            .split(body_chunks[1]);

        TitleBar::new(&layout.title, &self.theme).render(frame, main_chunks[0]);

        let visible = self.visible_sites();
        let site_list = SiteList::new(&layout.site_dropdown, &visible, self.selected_site, &self.theme)
            .filter(&self.site_filter, self.filtering);
        site_list.render(frame, control_chunks[0], self.focused == FocusedPanel::Sites);

        let slider = SliderView::new(&self.slider, &layout.payload_slider, &self.theme);
        slider.render(frame, control_chunks[1], self.focused == FocusedPanel::Payload);

        let range = self.slider.range();
        ChartView::new(&self.pie, range, &self.theme).render(frame, chart_chunks[0]);
        ChartView::new(&self.scatter, range, &self.theme).render(frame, chart_chunks[1]);

        // Render status bar
        let controls = self.controls();
        let status_bar = StatusBar::new(
            controls.site.value(),
            self.dashboard.table().len(),
            self.shown_launches(),
        );
        status_bar.render(frame, main_chunks[2]);

        // Render help overlay if active
        if self.show_help {
            let help = HelpOverlay::new(&self.theme);
            help.render(frame, size);
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Run the TUI application
pub fn run(dashboard: Dashboard) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(dashboard);
    info!("terminal dashboard started");

    // Main loop - always restore the terminal afterwards
    let result = run_main_loop(&mut terminal, &mut app);

    restore_terminal();
    terminal.show_cursor().ok();

    info!("terminal dashboard stopped");
    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{Palette, PayloadRange};
    use crate::data::sample_table;

    fn app() -> App {
        App::new(Dashboard::new(sample_table(), Palette::default()))
    }

    fn pie_labels(app: &App) -> Vec<String> {
        match &app.pie {
            ChartSpec::Pie(pie) => pie.segments.iter().map(|s| s.label.clone()).collect(),
            other => panic!("expected pie, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_with_defaults() {
        let app = app();
        assert_eq!(app.controls().site, SiteSelection::All);
        assert_eq!(app.controls().payload, PayloadRange::new(500.0, 2000.0));
        assert_eq!(pie_labels(&app), vec!["SiteA", "SiteB"]);
        assert_eq!(app.shown_launches(), 3);
    }

    #[test]
    fn test_site_navigation_rerenders_charts() {
        let mut app = app();
        app.handle_input(KeyCode::Char('j'));
        assert_eq!(app.controls().site, SiteSelection::Site("SiteA".to_string()));
        assert_eq!(pie_labels(&app), vec!["Success", "Failure"]);
        assert_eq!(app.shown_launches(), 2);

        // Wraps from the first option back to the last
        app.handle_input(KeyCode::Char('k'));
        app.handle_input(KeyCode::Char('k'));
        assert_eq!(app.controls().site, SiteSelection::Site("SiteB".to_string()));
        assert_eq!(app.shown_launches(), 1);
    }

    #[test]
    fn test_payload_keys_rerender_scatter_only() {
        let mut app = app();
        let pie_before = app.pie.clone();

        app.handle_input(KeyCode::Tab);
        assert_eq!(app.focused, FocusedPanel::Payload);
        app.handle_input(KeyCode::Char('l'));
        assert_eq!(app.controls().payload, PayloadRange::new(1000.0, 2000.0));
        assert_eq!(app.shown_launches(), 2);
        assert_eq!(app.pie, pie_before);

        app.handle_input(KeyCode::Char('0'));
        assert_eq!(app.shown_launches(), 3);
    }

    #[test]
    fn test_h_moves_handle_in_payload_panel() {
        let mut app = app();
        app.handle_input(KeyCode::Tab);
        app.handle_input(KeyCode::Char(' '));
        app.handle_input(KeyCode::Char('h'));
        assert!(!app.show_help);
        assert_eq!(app.controls().payload, PayloadRange::new(500.0, 1000.0));
        assert_eq!(app.shown_launches(), 1);
    }

    #[test]
    fn test_help_blocks_navigation() {
        let mut app = app();
        app.handle_input(KeyCode::Char('h'));
        assert!(app.show_help);
        app.handle_input(KeyCode::Char('j'));
        assert_eq!(app.selected_site, 0);
        app.handle_input(KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn test_site_search_narrows_and_selects() {
        let mut app = app();
        app.handle_input(KeyCode::Char('/'));
        assert!(app.filtering);

        // Typed keys go to the filter, not to the global shortcuts
        for c in "siteb".chars() {
            app.handle_input(KeyCode::Char(c));
        }
        assert!(!app.should_quit);
        assert_eq!(app.site_filter, "siteb");
        assert_eq!(app.visible_sites(), vec![2]);
        assert_eq!(app.controls().site, SiteSelection::Site("SiteB".to_string()));
        assert_eq!(app.shown_launches(), 1);

        // Enter keeps the filter; navigation stays within the matches
        app.handle_input(KeyCode::Enter);
        assert!(!app.filtering);
        app.handle_input(KeyCode::Char('j'));
        assert_eq!(app.selected_site, 2);
    }

    #[test]
    fn test_site_search_escape_clears_filter() {
        let mut app = app();
        app.handle_input(KeyCode::Char('/'));
        app.handle_input(KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert!(app.visible_sites().is_empty());
        // No match leaves the selection alone
        assert_eq!(app.controls().site, SiteSelection::All);

        app.handle_input(KeyCode::Backspace);
        assert_eq!(app.visible_sites(), vec![0, 1, 2]);
        app.handle_input(KeyCode::Char('A'));
        app.handle_input(KeyCode::Esc);
        assert!(!app.filtering);
        assert!(app.site_filter.is_empty());
        assert_eq!(app.visible_sites().len(), 3);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_input(KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
