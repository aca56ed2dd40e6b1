use itertools::Itertools;
use keyrace::participant::{Participant, ParticipantKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

/// Finishers by position, then everyone still on track by progress.
pub fn standings(participants: &[Participant]) -> Vec<&Participant> {
    participants
        .iter()
        .sorted_by(|a, b| match (a.position, b.position) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b
                .progress
                .partial_cmp(&a.progress)
                .unwrap_or(std::cmp::Ordering::Equal),
        })
        .collect()
}

pub fn render_leaderboard(participants: &[Participant], area: Rect, buf: &mut Buffer) {
    let header = Row::new(vec![
        Cell::from("Pos"),
        Cell::from("Racer"),
        Cell::from("WPM"),
        Cell::from("Acc"),
        Cell::from("Time"),
        Cell::from("XP"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = standings(participants)
        .into_iter()
        .map(|p| {
            let pos = match p.position {
                Some(pos) => format!("{pos}"),
                None => "-".to_string(),
            };
            let time = match p.finish_ms {
                Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
                None => format!("{:.0}%", p.progress),
            };
            let xp = match p.reward {
                Some(r) => format!("+{r}"),
                None => String::new(),
            };

            let style = if p.kind == ParticipantKind::Human {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if p.has_finished() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };

            Row::new(vec![
                Cell::from(pos),
                Cell::from(p.name.clone()),
                Cell::from(format!("{:.0}", p.wpm)),
                Cell::from(format!("{:.0}%", p.accuracy)),
                Cell::from(time),
                Cell::from(xp),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        &[
            Constraint::Length(4),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Standings"));

    table.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyrace::pacing::SpeedTier;
    use keyrace::participant::ParticipantSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn racer(id: usize, position: Option<usize>, progress: f64) -> Participant {
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = Participant::from_spec(
            id,
            &ParticipantSpec::rival(format!("r{id}"), SpeedTier::Swift),
            &mut rng,
        );
        p.position = position;
        p.progress = progress;
        if position.is_some() {
            p.finish_ms = Some(1000 * id as u64);
        }
        p
    }

    #[test]
    fn test_standings_finishers_lead() {
        let field = vec![
            racer(0, None, 80.0),
            racer(1, Some(2), 100.0),
            racer(2, Some(1), 100.0),
            racer(3, None, 95.0),
        ];
        let ordered = standings(&field);

        assert_eq!(ordered[0].id, 2);
        assert_eq!(ordered[1].id, 1);
        // Unfinished sorted by progress, furthest along first
        assert_eq!(ordered[2].id, 3);
        assert_eq!(ordered[3].id, 0);
    }

    #[test]
    fn test_render_leaderboard_smoke() {
        use ratatui::{backend::TestBackend, Terminal};

        let field = vec![racer(0, Some(1), 100.0), racer(1, None, 40.0)];
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                render_leaderboard(&field, area, f.buffer_mut());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("Standings"));
        assert!(content.contains("r0"));
    }
}
