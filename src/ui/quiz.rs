use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, ChoiceMark};

const MAX_LABELED_CHOICES: usize = 9;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status(frame, chunks[0], app);
    if let Some(notice) = app.notice() {
        frame.render_widget(Paragraph::new(notice).fg(Color::Yellow), chunks[1]);
    }
    render_question_text(frame, chunks[2], question.text());
    render_choices(frame, chunks[3], question.choices(), app);
    render_feedback(frame, chunks[4], app);
    render_controls(frame, chunks[5], app.is_answered());
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.progress();
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let score = Paragraph::new(format!("Score: {}", app.score())).fg(Color::DarkGray);
    let position = Paragraph::new(format!(
        "Question {} / {}",
        progress.position, progress.total
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);

    frame.render_widget(score, halves[0]);
    frame.render_widget(position, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, choices: &[String], app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let (marker, style) = match app.choice_mark(index) {
            ChoiceMark::Highlighted => (">", Style::default().fg(Color::Cyan).bold()),
            ChoiceMark::Correct => ("+", Style::default().fg(Color::Green).bold()),
            ChoiceMark::Wrong => ("x", Style::default().fg(Color::Red).bold()),
            ChoiceMark::Plain => (" ", Style::default().fg(Color::Gray)),
        };
        let label = if index < MAX_LABELED_CHOICES {
            format!("{}. ", index + 1)
        } else {
            "   ".to_string()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(label, style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, app: &App) {
    let Some(outcome) = app.last_outcome() else {
        return;
    };
    let color = if outcome.correct {
        Color::Green
    } else {
        Color::Red
    };

    let widget = Paragraph::new(outcome.feedback())
        .wrap(Wrap { trim: true })
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let hint = if answered {
        "n next  ·  q quit"
    } else {
        "j/k navigate  ·  enter select  ·  1-9 pick  ·  s skip  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
