use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    controls::OPTION_LABELS,
    quiz::QuizState,
    session::{RoundView, SessionView},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
/// Below this many seconds the countdown turns red.
const LOW_TIME_SECS: u32 = 3;

/// Terminal rendering of one session snapshot.
pub struct QuizScreen<'a> {
    pub view: &'a SessionView,
    /// Language of the hint line drawn under the prompt.
    pub hint_language: Option<&'a str>,
}

impl<'a> QuizScreen<'a> {
    pub fn new(view: &'a SessionView, hint_language: Option<&'a str>) -> Self {
        Self {
            view,
            hint_language,
        }
    }
}

impl Widget for &QuizScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view;
        match (view.state, view.current_round.as_ref()) {
            (QuizState::Playing | QuizState::Result, Some(round)) => {
                render_round(view, round, self.hint_language, area, buf)
            }
            (QuizState::Finished, _) => render_finished(view, area, buf),
            _ => Paragraph::new("Loading quiz...")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM | Modifier::BOLD))
                .render(area, buf),
        }
    }
}

fn render_round(view: &SessionView, round: &RoundView, hint_language: Option<&str>, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(1), // countdown
            Constraint::Length(1), // padding
            Constraint::Min(2),    // prompt + hint
            Constraint::Length(OPTION_LABELS.len() as u16 * 2),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!(" Q{}/{} ", view.current_index + 1, view.rounds_total),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(view.title.clone(), bold_style),
        Span::styled(format!("   score {}", view.score), dim_style),
    ]);
    Paragraph::new(header).render(chunks[0], buf);

    let gauge_color = if view.time_remaining <= LOW_TIME_SECS {
        Color::Red
    } else {
        Color::Blue
    };
    Gauge::default()
        .gauge_style(Style::default().fg(gauge_color))
        .ratio(view.time_ratio())
        .label(format!("{}s", view.time_remaining))
        .render(chunks[1], buf);

    let mut prompt_lines = vec![Line::from(Span::styled(round.prompt.clone(), bold_style))];
    if let Some(hint) = hint_language.and_then(|lang| round.translations.get(lang)) {
        prompt_lines.push(Line::from(Span::styled(hint.clone(), dim_style)));
    }
    let fits = round.prompt.width() <= chunks[3].width as usize;
    Paragraph::new(prompt_lines)
        .alignment(if fits { Alignment::Center } else { Alignment::Left })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let option_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(2); OPTION_LABELS.len()])
        .split(chunks[4]);

    for ((idx, option), row) in round.options.iter().enumerate().zip(option_rows.iter()) {
        let label = OPTION_LABELS.get(idx).copied().unwrap_or('?');
        let style = option_style(view, round, option);
        let marker = match (&round.correct_answer, &view.last_selected_option) {
            (Some(correct), _) if correct == option => " ✓",
            (Some(_), Some(picked)) if picked == option => " ✗",
            _ => "",
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("({label}) "), bold_style),
            Span::styled(format!("{option}{marker}"), style),
        ]))
        .wrap(Wrap { trim: true })
        .render(*row, buf);
    }

    let legend = match view.state {
        QuizState::Result if view.current_index + 1 == view.rounds_total => "(enter) see score / (esc)ape",
        QuizState::Result => "(enter) next question / (esc)ape",
        _ => "(a-d) answer / (esc)ape",
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);
}

fn option_style(view: &SessionView, round: &RoundView, option: &str) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    match &round.correct_answer {
        None => Style::default(),
        Some(correct) if correct == option => bold_style.fg(Color::Green),
        Some(_) if view.last_selected_option.as_deref() == Some(option) => bold_style.fg(Color::Red),
        Some(_) => Style::default().add_modifier(Modifier::DIM),
    }
}

fn render_finished(view: &SessionView, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1), // banner
            Constraint::Length(1), // padding
            Constraint::Length(1), // score
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let banner = if view.perfect {
        Span::styled(
            "PERFECT!",
            bold_style.fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        )
    } else {
        Span::styled("Quiz Finished!", bold_style)
    };
    Paragraph::new(banner).alignment(Alignment::Center).render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("{} / {}", view.score, view.rounds_total),
        bold_style.fg(Color::Magenta),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "(r)eplay / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[5], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizSession;
    use crate::session::QuizSettings;
    use crate::topic::{QuestionRecord, Topic};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::{backend::TestBackend, Terminal};

    fn session() -> QuizSession {
        let questions = (0..6)
            .map(|i| {
                QuestionRecord::new(format!("q{i}"), format!("Question number {i}?"), format!("Answer {i}"))
                    .with_translation("ja", format!("質問{i}"))
            })
            .collect();
        let topic = Topic::new("t", "Sample Topic", questions);
        let mut rng = StdRng::seed_from_u64(5);
        QuizSession::start(
            &topic,
            QuizSettings {
                rounds: 2,
                ..QuizSettings::default()
            },
            &mut rng,
        )
        .unwrap()
    }

    fn draw(view: &SessionView) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(&QuizScreen::new(view, Some("ja")), f.area()))
            .unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_render_playing_round() {
        let session = session();
        let content = draw(&session.view());

        assert!(content.contains("Q1/2"));
        assert!(content.contains("Sample Topic"));
        assert!(content.contains(&session.current_round().unwrap().prompt));
        assert!(content.contains("(A)"));
        assert!(content.contains("10s"));
    }

    #[test]
    fn test_render_result_marks_answer() {
        let mut session = session();
        let answer = session.current_round().unwrap().correct_answer.clone();
        session.submit_answer(&answer);

        let content = draw(&session.view());
        assert!(content.contains("✓"));
        assert!(content.contains("next question"));
    }

    #[test]
    fn test_render_finished_perfect() {
        let mut session = session();
        while session.final_score().is_none() {
            let answer = session.current_round().unwrap().correct_answer.clone();
            session.submit_answer(&answer);
            session.advance();
        }

        let content = draw(&session.view());
        assert!(content.contains("PERFECT!"));
        assert!(content.contains("2 / 2"));
    }

    #[test]
    fn test_render_finished_plain() {
        let mut session = session();
        while session.final_score().is_none() {
            session.submit_answer("nope");
            session.advance();
        }

        let content = draw(&session.view());
        assert!(content.contains("Quiz Finished!"));
        assert!(content.contains("0 / 2"));
    }

    #[test]
    fn test_render_loading() {
        let questions = vec![QuestionRecord::new("q", "p", "a")];
        let topic = Topic::new("t", "T", questions);
        let mut rng = StdRng::seed_from_u64(1);
        let session = QuizSession::prepare(&topic, QuizSettings::default(), &mut rng).unwrap();

        assert!(draw(&session.view()).contains("Loading quiz..."));
    }
}
