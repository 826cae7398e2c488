use crate::components::component::{Component, ComponentAction};
use crate::styles::{theme, LIST_HIGHLIGHT_SYMBOL};
use crate::view::{Gallery, GalleryContent};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};

/// Image list of the studio, one row per gallery item
pub struct GalleryComponent {
    gallery: Gallery,
    list_state: ListState,
    scrollbar_state: ScrollbarState,
    /// Area the list was last drawn in, for mouse hit testing
    list_area: Rect,
}

impl Default for GalleryComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryComponent {
    pub fn new() -> Self {
        Self {
            gallery: Gallery::new(),
            list_state: ListState::default(),
            scrollbar_state: ScrollbarState::new(0),
            list_area: Rect::default(),
        }
    }

    /// Take a fresh copy of the view's gallery before drawing
    pub fn sync(&mut self, gallery: &Gallery) {
        let len = gallery.len();
        self.gallery = gallery.clone();
        self.scrollbar_state = ScrollbarState::new(len.saturating_sub(1));

        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Row index under a mouse position, if it hits an item
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inner = Rect {
            x: self.list_area.x + 1,
            y: self.list_area.y + 1,
            width: self.list_area.width.saturating_sub(2),
            height: self.list_area.height.saturating_sub(2),
        };
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.list_state.offset() + (row - inner.y) as usize;
        (index < self.gallery.len()).then_some(index)
    }
}

impl Component for GalleryComponent {
    fn render(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let t = theme();
        self.list_area = area;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(
                "Your Images ({} selected / {})",
                self.gallery.selected_urls().len(),
                self.gallery.len()
            ))
            .title_alignment(Alignment::Center);

        match self.gallery.content() {
            GalleryContent::Images(items) => {
                let rows: Vec<ListItem> = items
                    .iter()
                    .map(|item| {
                        let (mark, style) = if item.is_selected() {
                            ("[x]", t.success_style().add_modifier(Modifier::BOLD))
                        } else {
                            ("[ ]", t.text_style())
                        };
                        ListItem::new(format!("{} {}  ({})", mark, item.src(), item.width()))
                            .style(style)
                    })
                    .collect();

                let list = List::new(rows)
                    .block(block)
                    .highlight_style(t.highlight_style())
                    .highlight_symbol(LIST_HIGHLIGHT_SYMBOL);
                frame.render_stateful_widget(list, area, &mut self.list_state);

                if let Some(selected) = self.list_state.selected() {
                    self.scrollbar_state = self.scrollbar_state.position(selected);
                }
                let scrollbar = Scrollbar::default()
                    .orientation(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓"));
                frame.render_stateful_widget(scrollbar, area, &mut self.scrollbar_state);
            }
            GalleryContent::Placeholder(text) => {
                let para = Paragraph::new(text.as_str())
                    .style(t.muted_style())
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(para, area);
            }
            GalleryContent::Empty => {
                let para = Paragraph::new("Loading images...")
                    .style(t.muted_style())
                    .alignment(Alignment::Center)
                    .block(block);
                frame.render_widget(para, area);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<ComponentAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(match key.code {
                KeyCode::Char('q') | KeyCode::Esc => ComponentAction::Quit,
                KeyCode::Up | KeyCode::Char('k') => {
                    if !self.gallery.is_empty() {
                        self.list_state.select_previous();
                    }
                    ComponentAction::Update
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if !self.gallery.is_empty() {
                        let last = self.gallery.len() - 1;
                        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(last));
                        self.list_state.select(Some(next));
                    }
                    ComponentAction::Update
                }
                KeyCode::Char(' ') | KeyCode::Enter => match self.list_state.selected() {
                    Some(index) => ComponentAction::ToggleImage(index),
                    None => ComponentAction::None,
                },
                KeyCode::Char('r') => ComponentAction::CycleResolution,
                KeyCode::Char('m') => ComponentAction::CycleAudioMood,
                KeyCode::Char('c') => ComponentAction::CreateVideo,
                KeyCode::Char('d') => ComponentAction::Download,
                KeyCode::F(5) | KeyCode::Char('g') => ComponentAction::Refresh,
                _ => ComponentAction::None,
            }),
            Event::Mouse(mouse) => Ok(match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    match self.row_at(mouse.column, mouse.row) {
                        Some(index) => {
                            self.list_state.select(Some(index));
                            ComponentAction::ToggleImage(index)
                        }
                        None => ComponentAction::None,
                    }
                }
                MouseEventKind::ScrollUp => {
                    self.list_state.select_previous();
                    ComponentAction::Update
                }
                MouseEventKind::ScrollDown => {
                    if !self.gallery.is_empty() {
                        let last = self.gallery.len() - 1;
                        let next = self.list_state.selected().map_or(0, |i| (i + 1).min(last));
                        self.list_state.select(Some(next));
                    }
                    ComponentAction::Update
                }
                _ => ComponentAction::None,
            }),
            _ => Ok(ComponentAction::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn component_with(urls: &[&str]) -> GalleryComponent {
        let mut gallery = Gallery::new();
        gallery.replace_images(urls.iter().copied());
        let mut component = GalleryComponent::new();
        component.sync(&gallery);
        component
    }

    #[test]
    fn test_space_toggles_cursor_row() {
        let mut component = component_with(&["a.png", "b.png"]);
        component.handle_event(press(KeyCode::Down)).unwrap();
        let action = component.handle_event(press(KeyCode::Char(' '))).unwrap();
        assert_eq!(action, ComponentAction::ToggleImage(1));
    }

    #[test]
    fn test_cursor_stops_at_last_row() {
        let mut component = component_with(&["a.png", "b.png"]);
        for _ in 0..5 {
            component.handle_event(press(KeyCode::Down)).unwrap();
        }
        assert_eq!(component.cursor(), Some(1));
    }

    #[test]
    fn test_sync_clamps_cursor_when_gallery_shrinks() {
        let mut component = component_with(&["a.png", "b.png", "c.png"]);
        component.handle_event(press(KeyCode::Down)).unwrap();
        component.handle_event(press(KeyCode::Down)).unwrap();

        let mut smaller = Gallery::new();
        smaller.replace_images(["a.png"]);
        component.sync(&smaller);
        assert_eq!(component.cursor(), Some(0));

        component.sync(&Gallery::new());
        assert_eq!(component.cursor(), None);
    }

    #[test]
    fn test_option_keys() {
        let mut component = component_with(&[]);
        assert_eq!(component.handle_event(press(KeyCode::Char('r'))).unwrap(), ComponentAction::CycleResolution);
        assert_eq!(component.handle_event(press(KeyCode::Char('m'))).unwrap(), ComponentAction::CycleAudioMood);
        assert_eq!(component.handle_event(press(KeyCode::Char('c'))).unwrap(), ComponentAction::CreateVideo);
        assert_eq!(component.handle_event(press(KeyCode::Char(' '))).unwrap(), ComponentAction::None);
        assert_eq!(component.handle_event(press(KeyCode::Esc)).unwrap(), ComponentAction::Quit);
    }
}
