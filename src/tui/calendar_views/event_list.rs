use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use op_agenda::{
    app::AppState,
    calendar::{event::NO_EVENTS_LABEL, long_date_label},
    ui::theme::Theme,
};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let events = app.events_for_selected();

    let title = app
        .selected_date()
        .map(long_date_label)
        .unwrap_or_else(|| app.selected_key.to_string());

    let mut lines = vec![
        Line::from(vec![
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    if events.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(NO_EVENTS_LABEL, Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        let selected_base = Style::default().bg(app.theme.selected_bg).add_modifier(Modifier::BOLD);

        for (idx, event) in events.iter().enumerate() {
            let is_selected = idx == app.selected_event_index;
            let dot_color = event
                .category(&app.categories)
                .map(|c| Theme::category_color(&c.color))
                .unwrap_or(Color::White);

            let title_style = if is_selected {
                selected_base.fg(app.theme.selected_fg)
            } else {
                Style::default().fg(Color::White)
            };

            let cursor = if is_selected { ">" } else { " " };

            lines.push(Line::from(vec![
                Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
                Span::styled("● ", Style::default().fg(dot_color)),
                Span::styled(&event.title, title_style),
            ]));
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(event.meta_label(&app.categories), Style::default().fg(Color::DarkGray)),
            ]));

            if !event.description.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::raw(&event.description),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("[ ]", Style::default().fg(Color::Cyan)),
            Span::raw(" = Seleccionar | "),
            Span::styled("x", Style::default().fg(Color::Red)),
            Span::raw(" = Eliminar"),
        ]));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
