use crate::styles::theme;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Title bar of the studio: a one-line summary and `label: value` facts
pub struct Header;

impl Header {
    /// Draw the header; `facts` are shown on the second line, separated by bars
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        summary: &str,
        facts: &[(&str, &str)],
    ) -> Result<()> {
        let t = theme();

        let mut fact_spans = Vec::with_capacity(facts.len() * 3);
        for (i, (label, value)) in facts.iter().enumerate() {
            if i > 0 {
                fact_spans.push(Span::styled("  |  ", t.muted_style()));
            }
            fact_spans.push(Span::styled(format!("{}: ", label), t.muted_style()));
            fact_spans.push(Span::styled(value.to_string(), t.emphasis_style()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(t.border_focused_style())
            .title(Line::from(format!(" {} ", title)).centered())
            .title_style(t.title_style())
            .padding(ratatui::widgets::Padding::horizontal(1));

        let lines = vec![
            Line::from(Span::styled(summary.to_string(), t.text_style())),
            Line::from(fact_spans),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        Ok(())
    }
}
