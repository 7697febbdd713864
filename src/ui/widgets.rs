//! UI widgets for the launch dashboard.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::dashboard::layout::Dropdown;
use super::theme::Theme;

/// Page title banner
pub struct TitleBar<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        TitleBar { title, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(Span::styled(self.title, self.theme.title_style())))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM).border_style(self.theme.border_style()));

        frame.render_widget(paragraph, area);
    }
}

/// Launch site selector, one row per dropdown option that passes the filter
pub struct SiteList<'a> {
    dropdown: &'a Dropdown,
    visible: &'a [usize],
    selected: usize,
    filter: &'a str,
    editing: bool,
    theme: &'a Theme,
}

impl<'a> SiteList<'a> {
    pub fn new(dropdown: &'a Dropdown, visible: &'a [usize], selected: usize, theme: &'a Theme) -> Self {
        SiteList {
            dropdown,
            visible,
            selected,
            filter: "",
            editing: false,
            theme,
        }
    }

    /// Show the current search query; `editing` means keys are being typed into it
    pub fn filter(mut self, query: &'a str, editing: bool) -> Self {
        self.filter = query;
        self.editing = editing;
        self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let items: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&i| self.dropdown.options.get(i))
            .map(|o| ListItem::new(o.label.clone()))
            .collect();

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let mut block = Block::default()
            .title(" Launch Site ")
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title_style(title_style);

        if self.editing && self.filter.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" /{} ", self.dropdown.placeholder),
                self.theme.dimmed_style(),
            )));
        } else if self.editing || !self.filter.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" /{} ", self.filter),
                self.theme.normal_style(),
            )));
        }

        if items.is_empty() {
            let message = Paragraph::new("No matching sites")
                .style(self.theme.dimmed_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let list = List::new(items)
            .block(block)
            .style(self.theme.normal_style())
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.visible.iter().position(|&i| i == self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Status bar widget
pub struct StatusBar<'a> {
    site: &'a str,
    records: usize,
    shown: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(site: &'a str, records: usize, shown: usize) -> Self {
        StatusBar {
            site,
            records,
            shown,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = format!(
            "launchdash: {} | {} of {} launches in range | [/] Search [h] Help [q] Quit",
            self.site, self.shown, self.records
        );

        let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
