use crate::styles::theme;
use crate::utils::center_popup;
use crate::view::is_failure_message;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Modal box showing one alert until it is dismissed
pub struct MessageBox;

impl MessageBox {
    /// Render `message` centered over `area`
    ///
    /// Failure messages get the error color and title.
    pub fn render(frame: &mut Frame, area: Rect, message: &str) -> Result<()> {
        let t = theme();

        let (title, color) = if is_failure_message(message) {
            ("Error", t.error)
        } else {
            ("Message", t.primary)
        };

        let popup = center_popup(area, 60, 30);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(color))
            .title_bottom(Line::from(" Press any key ").centered())
            .padding(ratatui::widgets::Padding::new(2, 2, 1, 1));

        let paragraph = Paragraph::new(message)
            .style(t.text_style())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(paragraph, popup);
        Ok(())
    }
}
