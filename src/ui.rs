pub mod charting;
pub mod leaderboard;

use keyrace::participant::ParticipantKind;
use keyrace::race::Phase;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const LANE_BAR_WIDTH: usize = 28;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (self.state == AppState::Results, self.session.phase()) {
            (false, Phase::Pending) | (false, Phase::Countdown) => {
                render_countdown(self, area, buf);
            }
            (false, _) => {
                render_track(self, area, buf);
            }
            (true, _) => {
                render_results(self, area, buf);
            }
        }
    }
}

fn render_countdown(app: &App, area: Rect, buf: &mut Buffer) {
    let message = match app.session.phase() {
        Phase::Pending => "waiting for racers...".to_string(),
        _ => format!(
            "race begins in {}",
            app.session.countdown_remaining().ceil() as u64
        ),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(app.session.participants().len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    render_lanes(app, chunks[0], buf);

    let banner = Paragraph::new(Span::styled(
        message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    banner.render(chunks[2], buf);
}

fn render_track(app: &App, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let passage = app.session.passage();
    let mut prompt_occupied_lines =
        ((passage.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
    if passage.width() <= max_chars_per_line as usize {
        prompt_occupied_lines = 1;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(app.session.participants().len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Length(prompt_occupied_lines),
            Constraint::Min(1),
        ])
        .split(area);

    render_lanes(app, chunks[0], buf);

    let prompt = Paragraph::new(Line::from(prompt_spans(app)))
        .alignment(if prompt_occupied_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    prompt.render(chunks[2], buf);

    if let Some(announcement) = app.latest_finish() {
        let ticker = Paragraph::new(Span::styled(
            announcement,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        ticker.render(chunks[3], buf);
    }
}

/// One line per lane: name, progress bar, percentage, live wpm, and the
/// finishing position once the lane is done.
fn render_lanes(app: &App, area: Rect, buf: &mut Buffer) {
    let participants = app.session.participants();
    let name_width = participants
        .iter()
        .map(|p| p.name.width())
        .max()
        .unwrap_or(4);

    let lines: Vec<Line> = participants
        .iter()
        .map(|p| {
            let filled = (p.progress / 100.0 * LANE_BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(LANE_BAR_WIDTH);
            let bar = format!(
                "{}{}",
                "=".repeat(filled),
                ".".repeat(LANE_BAR_WIDTH - filled)
            );
            let tail = match p.position {
                Some(pos) => format!("  #{pos}"),
                None => String::new(),
            };
            let text = format!(
                "{:<name_width$}  [{bar}] {:>3.0}%  {:>3.0} wpm{tail}",
                p.name, p.progress, p.wpm,
            );

            let style = if p.kind == ParticipantKind::Human {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if p.has_finished() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::from(Span::styled(text, style))
        })
        .collect();

    let block = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Field"));
    block.render(area, buf);
}

fn prompt_spans(app: &App) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    let cursor = app.session.cursor();
    let chars: Vec<char> = app.session.passage().chars().collect();
    let pos = cursor.cursor_pos();

    let mut spans = Vec::with_capacity(3);
    if pos > 0 {
        spans.push(Span::styled(
            chars[..pos].iter().collect::<String>(),
            green_bold_style,
        ));
    }
    if pos < chars.len() {
        // The character under the cursor flashes red while the last
        // keystroke was a rejected one.
        let style = if cursor.has_error() {
            red_bold_style
        } else {
            underlined_dim_bold_style
        };
        spans.push(Span::styled(chars[pos].to_string(), style));
    }
    if pos + 1 < chars.len() {
        spans.push(Span::styled(
            chars[pos + 1..].iter().collect::<String>(),
            dim_bold_style,
        ));
    }
    spans
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);
    let magenta_style = Style::default().fg(Color::Magenta);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // stats
            Constraint::Length(1), // outcome
            Constraint::Length(10), // standings
            Constraint::Length(1), // legend
        ])
        .split(area);

    let samples = app.session.wpm_samples();
    let (overall_duration, highest_wpm) = charting::compute_chart_params(samples);

    let tuples: Vec<(f64, f64)> = samples.iter().map(|s| (s.t, s.wpm)).collect();
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(magenta_style)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", bold_style),
                    Span::styled(charting::format_label(overall_duration), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", bold_style),
                    Span::styled(charting::format_label(highest_wpm), bold_style),
                ]),
        );
    chart.render(chunks[0], buf);

    let human = app.session.human();
    let stats = Paragraph::new(Span::styled(
        format!(
            "{:.0} wpm   {:.0}% acc   {:.2} sd",
            human.wpm,
            human.accuracy,
            app.session.consistency()
        ),
        bold_style,
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let outcome = match (human.position, human.reward) {
        (Some(pos), Some(xp)) => format!(
            "finished #{pos} of {}   +{xp} xp",
            app.session.participants().len()
        ),
        _ => "did not finish".to_string(),
    };
    let outcome_widget = Paragraph::new(Span::styled(
        outcome,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    outcome_widget.render(chunks[2], buf);

    leaderboard::render_leaderboard(app.session.participants(), chunks[3], buf);

    let legend = Paragraph::new(Span::styled(
        "(r)etry / (n)ew / (h)istory / (esc)ape",
        italic_style,
    ));
    legend.render(chunks[4], buf);
}
