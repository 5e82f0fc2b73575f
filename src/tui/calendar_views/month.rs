use chrono::NaiveDate;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use op_agenda::{
    app::AppState,
    calendar::month_name::WEEKDAY_SHORT,
    ui::{month_view::{self, MAX_EVENT_DOTS}, theme::Theme},
};

const CELL_WIDTH: usize = MAX_EVENT_DOTS + 1;

pub fn render(f: &mut Frame, app: &AppState, today: NaiveDate, area: ratatui::layout::Rect) {
    let layout = month_view::calculate_layout(app, today);

    let header = WEEKDAY_SHORT
        .iter()
        .map(|name| Span::styled(format!(" {:<3} ", name), Style::default().fg(app.theme.weekday_header)))
        .collect::<Vec<_>>();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {}", layout.month_name, layout.year),
                Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(header),
    ];

    for week in &layout.weeks {
        let mut day_spans = Vec::new();
        let mut dot_spans = Vec::new();

        for day_cell in &week.days {
            let mut style = Style::default();

            if day_cell.is_selected {
                style = style.bg(app.theme.selected_bg).fg(app.theme.selected_fg).add_modifier(Modifier::BOLD);
            } else if !day_cell.is_current_month() {
                style = style.fg(app.theme.outside_day);
            } else if day_cell.is_today {
                style = style.fg(app.theme.today).add_modifier(Modifier::BOLD);
            }

            if day_cell.is_today {
                style = style.add_modifier(Modifier::UNDERLINED);
            }

            day_spans.push(Span::styled(format!(" {:>2}  ", day_cell.cell.day), style));

            let dots = day_cell.dot_colors.len();
            dot_spans.push(Span::raw(" "));
            for color in &day_cell.dot_colors {
                dot_spans.push(Span::styled("●", Style::default().fg(Theme::category_color(color))));
            }
            dot_spans.push(Span::raw(" ".repeat(CELL_WIDTH.saturating_sub(1 + dots))));
        }

        lines.push(Line::from(day_spans));
        lines.push(Line::from(dot_spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("hjkl", Style::default().fg(Color::Cyan)),
        Span::raw(" = Moure | "),
        Span::styled("{ }", Style::default().fg(Color::Cyan)),
        Span::raw(" = Mes | "),
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" = Nou esdeveniment | "),
        Span::styled("c", Style::default().fg(Color::Magenta)),
        Span::raw(" = Categories"),
    ]));

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, area);
}
