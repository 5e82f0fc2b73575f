use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use op_agenda::{app::AppState, ui::theme::Theme};

pub fn render(f: &mut Frame, app: &AppState, area: ratatui::layout::Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Categories", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
    ];

    for (idx, category) in app.categories.iter().enumerate() {
        let is_selected = idx == app.selected_category_index;
        let name_style = if is_selected {
            Style::default().bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(if is_selected { ">" } else { " " }, Style::default().fg(app.theme.selected_bg)),
            Span::styled("● ", Style::default().fg(Theme::category_color(&category.color))),
            Span::styled(format!("{:<20}", category.name), name_style),
            Span::styled(format!(" {} {}", category.color, category.id), Style::default().fg(Color::DarkGray)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Cyan)),
        Span::raw(" = Seleccionar | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Afegir | "),
        Span::styled("x", Style::default().fg(Color::Red)),
        Span::raw(" = Eliminar | "),
        Span::styled("c/Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" = Tornar"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
