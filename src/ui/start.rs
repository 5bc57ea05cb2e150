use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ RUNNER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Multiple choice · instant feedback".fg(Color::DarkGray)),
        Line::from(""),
    ];

    if app.is_loading() {
        content.push(Line::from(Span::styled(
            "Loading questions...",
            Style::default().fg(Color::Yellow),
        )));
    } else {
        content.push(Line::from(vec![
            Span::styled("ENTER", Style::default().fg(Color::Green).bold()),
            Span::styled(" built-in set  ·  ", Style::default().fg(Color::DarkGray)),
            Span::styled("L", Style::default().fg(Color::Green).bold()),
            Span::styled(" load questions", Style::default().fg(Color::DarkGray)),
        ]));
    }
    content.push(Line::from(""));
    content.push(Line::from("q quit".fg(Color::DarkGray)));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .fg(Color::Yellow);
        frame.render_widget(widget, chunks[2]);
    }
}
