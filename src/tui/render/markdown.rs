//! Light markdown styling for the log pager. Only line-level constructs are
//! recognised: headings, bullets, quotes and fenced code.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::theme::Theme;

pub fn markdown_lines(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let base = Style::default().fg(theme.text).bg(theme.background);
    let mut in_code = false;
    let mut lines = Vec::new();

    for raw in text.lines() {
        let trimmed = raw.trim_start();
        if trimmed.starts_with("```") {
            in_code = !in_code;
            lines.push(Line::from(Span::styled(
                raw.to_string(),
                base.fg(theme.dim),
            )));
            continue;
        }
        if in_code {
            lines.push(Line::from(Span::styled(
                format!("  {}", raw),
                base.fg(theme.cyan),
            )));
            continue;
        }

        let line = if let Some(level) = heading_level(trimmed) {
            let title = trimmed[level..].trim_start().to_string();
            let mut style = base.fg(theme.heading).add_modifier(Modifier::BOLD);
            if level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Line::from(Span::styled(title, style))
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            let indent = " ".repeat(raw.len() - trimmed.len());
            Line::from(vec![
                Span::styled(format!("{}\u{2022} ", indent), base.fg(theme.highlight)),
                Span::styled(item.to_string(), base),
            ])
        } else if let Some(quote) = trimmed.strip_prefix('>') {
            Line::from(vec![
                Span::styled("\u{2502} ", base.fg(theme.dim)),
                Span::styled(
                    quote.trim_start().to_string(),
                    base.fg(theme.dim).add_modifier(Modifier::ITALIC),
                ),
            ])
        } else {
            Line::from(Span::styled(raw.to_string(), base))
        };
        lines.push(line);
    }
    lines
}

/// `#`..`######` followed by a space
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&level) && line[level..].starts_with(' ') {
        Some(level)
    } else {
        None
    }
}
