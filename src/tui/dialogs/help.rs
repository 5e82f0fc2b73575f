use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use op_agenda::{app::AppState, ui::theme::Theme};

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 60;
    let help_height = 23;
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width.min(area.width),
        height: help_height.min(area.height),
    };

    f.render_widget(Clear, help_area);

    let section = |title: &'static str| Line::from(vec![Span::styled(title, Style::default().fg(app.theme.help_section))]);

    let help_text = vec![
        Line::from(vec![Span::styled("Ajuda de op-agenda", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("Navegació:"),
        Line::from("  h/l      - Dia anterior/següent"),
        Line::from("  j/k      - Setmana anterior/següent"),
        Line::from("  { / }    - Mes anterior/següent"),
        Line::from("  t        - Anar a avui"),
        Line::from("  Enter    - Mostrar/amagar el panell"),
        Line::from(""),
        section("Esdeveniments:"),
        Line::from("  a        - Afegir esdeveniment al dia"),
        Line::from("  [ / ]    - Esdeveniment anterior/següent"),
        Line::from("  x        - Eliminar l'esdeveniment"),
        Line::from(""),
        section("Categories:"),
        Line::from("  c        - Obrir/tancar les categories"),
        Line::from("  a / x    - Afegir / eliminar (categories)"),
        Line::from(""),
        section("Ordres:"),
        Line::from("  :q       - Sortir"),
        Line::from("  :today   - Anar a avui"),
        Line::from("  :goto    - Anar a una data (:goto 2025-12-25)"),
        Line::from("  :new     - Nou esdeveniment (:new [títol])"),
        Line::from("  :cat add - Afegir categoria (:cat add Gimnàs #4ade80)"),
        Line::from("  :cat rm  - Eliminar categoria (:cat rm <id>)"),
        Line::from(format!("  :theme   - Canviar el tema ({})", Theme::available_themes().join(", "))),
        Line::from("  :help    - Mostrar aquesta ajuda"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Ajuda (j/k per desplaçar, q per tancar) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
