use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use op_agenda::{
    app::{AppState, FormField},
    calendar::long_date_label,
    ui::theme::Theme,
};

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.event_form else {
        return;
    };

    let area = f.size();
    let form_width = 70;
    let form_height = if form.all_day { 18 } else { 20 };
    let x = (area.width.saturating_sub(form_width)) / 2;
    let y = (area.height.saturating_sub(form_height)) / 2;

    let form_area = ratatui::layout::Rect {
        x,
        y,
        width: form_width.min(area.width),
        height: form_height.min(area.height),
    };

    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label = |field: FormField, text: &'static str| {
        Span::styled(
            text,
            Style::default().fg(if form.active_field == field { active_color } else { inactive_color }),
        )
    };

    let date_label = form
        .date
        .to_date()
        .map(long_date_label)
        .unwrap_or_else(|| form.date.to_string());

    let category = app.categories.get(form.category_index);
    let category_span = match category {
        Some(c) => Span::styled(format!("● {}", c.name), Style::default().fg(Theme::category_color(&c.color))),
        None => Span::styled("(cap)", Style::default().fg(inactive_color)),
    };

    let mut form_text = vec![
        Line::from(vec![Span::styled("Nou esdeveniment", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Data: ", Style::default().fg(inactive_color)),
            Span::raw(date_label),
        ]),
        Line::from(""),
        Line::from(vec![label(FormField::Title, "Títol: "), Span::raw(&form.title)]),
        Line::from(""),
        Line::from(vec![label(FormField::Description, "Descripció: "), Span::raw(&form.description)]),
        Line::from(""),
        Line::from(vec![
            label(FormField::AllDay, "Tot el dia: "),
            Span::raw(if form.all_day { "[x]" } else { "[ ]" }),
        ]),
        Line::from(""),
    ];

    if !form.all_day {
        form_text.extend(vec![
            Line::from(vec![
                label(FormField::Time, "Hora: "),
                Span::raw(&form.time_input_buffer),
                Span::styled(if form.active_field == FormField::Time {
                    if form.time_buffer_touched {
                        " (HH:MM o HHMM)"
                    } else {
                        " [escriu per substituir]"
                    }
                } else { "" }, Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(""),
        ]);
    }

    form_text.extend(vec![
        Line::from(vec![label(FormField::Category, "Categoria: "), category_span]),
        Line::from(""),
        Line::from(vec![
            label(FormField::Repeat, "Repetició: "),
            Span::raw(form.repeat.label().unwrap_or("Cap")),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" = Camp següent | "),
            Span::styled("←/→", Style::default().fg(Color::Cyan)),
            Span::raw(" = Canviar | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Desar | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Cancel·lar"),
        ]),
    ]);

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Nou esdeveniment ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}
