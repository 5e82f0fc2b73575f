use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use op_agenda::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some((key, index)) = &app.delete_confirmation else {
        return;
    };

    let event_title = app
        .events
        .events_on(key)
        .get(*index)
        .map(|e| e.title.as_str())
        .unwrap_or("aquest esdeveniment");

    let area = f.size();
    let dialog_width = 60;
    let dialog_height = 9;
    let x = (area.width.saturating_sub(dialog_width)) / 2;
    let y = (area.height.saturating_sub(dialog_height)) / 2;

    let dialog_area = ratatui::layout::Rect {
        x,
        y,
        width: dialog_width.min(area.width),
        height: dialog_height.min(area.height),
    };

    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled("Eliminar l'esdeveniment?", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Eliminar "),
            Span::styled(event_title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(format!(" del {}?", key)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("S", Style::default().fg(Color::Green)),
            Span::raw(" = Sí, eliminar | "),
            Span::styled("N", Style::default().fg(Color::Red)),
            Span::raw(" = No, cancel·lar"),
        ]),
    ];

    let dialog_paragraph = Paragraph::new(dialog_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Confirmar ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(dialog_paragraph, dialog_area);
}
