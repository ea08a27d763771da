use crate::app::App;
use crate::registry::{GameId, Screen};
use blackjack::{Card, Hand, HandSide, PlayerTurn, RoundPhase};
use carousel_store::{Storage, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Colors for one theme
struct Palette {
    text: Color,
    background: Color,
    accent: Color,
    muted: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::DarkTheme => Palette {
                text: Color::White,
                background: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
            },
            Theme::LightTheme => Palette {
                text: Color::Black,
                background: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
            },
        }
    }

    fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }
}

pub fn ui<S: Storage>(f: &mut Frame, app: &App<S>) {
    let palette = Palette::for_theme(app.theme.theme());
    f.render_widget(Block::default().style(palette.base()), f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Screen
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_title(f, app, &palette, main_chunks[0]);

    let (screen_area, log_area) = if app.log_visible {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[1]);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    match app.screen {
        Screen::Home => draw_home(f, app, &palette, screen_area),
        Screen::Blackjack => draw_table(f, app, &palette, screen_area),
        Screen::Rankings => draw_rankings(f, app, &palette, screen_area),
        Screen::Settings => draw_settings(f, app, &palette, screen_area),
    }

    if let Some(log_area) = log_area {
        draw_logs(f, app, &palette, log_area);
    }

    let status_bar = Paragraph::new(app.status.as_str())
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);
}

fn draw_title<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let mut spans = vec![Span::styled(
        "Game Carousel ",
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )];
    for tab in Screen::TABS {
        let style = if app.screen == tab {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        format!("● {} coins", app.table.balance()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ));

    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_home<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let selected = app.selected_game();
    let carousel: Vec<Span> = GameId::ALL
        .iter()
        .flat_map(|id| {
            let style = if *id == selected {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(palette.muted)
            };
            [Span::styled(format!(" {} ", id.title()), style), Span::raw("  ")]
        })
        .collect();

    let availability = if app.is_playable(selected) {
        Span::styled("Press Enter to play", Style::default().fg(Color::Green))
    } else {
        Span::styled("Coming soon", Style::default().fg(palette.muted))
    };

    let padding = area.height.saturating_sub(8) / 2;
    let mut lines: Vec<Line> = vec![Line::from(""); padding as usize];
    let mut carousel_line = vec![Span::raw("◀  ")];
    carousel_line.extend(carousel);
    carousel_line.push(Span::raw(" ▶"));
    lines.push(Line::from(carousel_line));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        selected.title(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(selected.description()));
    lines.push(Line::from(""));
    lines.push(Line::from(availability));

    let home = Paragraph::new(lines)
        .block(Block::default().title(" Games ").borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(home, area);
}

fn card_span(card: &Card) -> Span<'static> {
    let card_str = card.to_display();
    let color = match card_str.chars().last() {
        Some('♥') => Color::Red,
        Some('♦') => Color::from_u32(0xFF_A5_00), // Orange
        Some('♣') => Color::Magenta,
        Some('♠') => Color::Black,
        _ => Color::White,
    };
    Span::styled(format!("{card_str} "), Style::default().fg(color).bg(Color::Gray))
}

fn hidden_span() -> Span<'static> {
    Span::styled("?? ", Style::default().fg(Color::White).bg(Color::DarkGray))
}

/// Cards wrapped to the width of `area` and centered vertically
fn hand_lines(cards: Vec<Span<'static>>, area: Rect) -> Vec<Line<'static>> {
    let width = area.width.saturating_sub(2);
    let card_width = 4;
    let cards_per_line = (width / card_width).max(1) as usize;

    let wrapped: Vec<Line> = cards
        .chunks(cards_per_line)
        .map(|chunk| Line::from(chunk.to_vec()))
        .collect();

    let height = area.height.saturating_sub(2);
    let padding_top = height.saturating_sub(wrapped.len() as u16) / 2;
    let mut lines: Vec<Line> = vec![Line::from(""); padding_top as usize];
    lines.extend(wrapped);
    lines
}

fn draw_table<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let table = &app.table;
    let round = table.round();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Min(3),
        ])
        .split(area);

    // Dealer
    let dealer_cards: Vec<Span> = round
        .dealer
        .cards
        .iter()
        .enumerate()
        .map(|(idx, card)| {
            if idx == 1 && !round.dealer_revealed {
                hidden_span()
            } else {
                card_span(card)
            }
        })
        .collect();
    let dealer = Paragraph::new(hand_lines(dealer_cards, rows[0]))
        .block(
            Block::default()
                .title(format!(" Dealer ({}) ", table.dealer_visible_score()))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);
    f.render_widget(dealer, rows[0]);

    // Player
    let playing = round.phase == RoundPhase::Playing;
    match &round.turn {
        PlayerTurn::Single(turn) => {
            let style = if playing {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            draw_hand(f, " You ", &turn.hand, style, rows[1]);
        }
        PlayerTurn::Split(turn) => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(rows[1]);
            for (side, half) in [(HandSide::Left, halves[0]), (HandSide::Right, halves[1])] {
                let active = playing && turn.active == side;
                let style = if active {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if active { "▶ " } else { "" };
                let title = format!(" {marker}{} hand ", side.label());
                draw_hand(f, &title, turn.hand(side), style, half);
            }
        }
    }

    // Bet and chips
    let mut chip_spans = vec![Span::raw("Chips: ")];
    for (idx, chip) in app.chips().iter().enumerate() {
        let style = if idx == app.chip_index && round.phase == RoundPhase::Betting {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.muted)
        };
        chip_spans.push(Span::styled(format!(" {chip} "), style));
        chip_spans.push(Span::raw(" "));
    }
    let bet_line = Line::from(vec![
        Span::raw(format!("Bet: {}", table.current_bet())),
        Span::styled(
            format!("   (last {})", table.previous_bet()),
            Style::default().fg(palette.muted),
        ),
        Span::styled(
            format!("   shoe {}", table.shoe_len()),
            Style::default().fg(palette.muted),
        ),
    ]);
    let bets = Paragraph::new(vec![bet_line, Line::from(chip_spans)])
        .block(Block::default().title(" Bet ").borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(bets, rows[2]);
}

fn draw_hand(f: &mut Frame, title: &str, hand: &Hand, border_style: Style, area: Rect) {
    let cards: Vec<Span> = hand.cards.iter().map(card_span).collect();
    let block = Paragraph::new(hand_lines(cards, area))
        .block(
            Block::default()
                .title(format!("{title}({}) ", hand.score))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .alignment(Alignment::Center);
    f.render_widget(block, area);
}

fn draw_rankings<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let lines: Vec<Line> = GameId::ALL
        .iter()
        .map(|id| {
            let best = app.scores.get_best_score(id.as_str());
            let score = if best == 0 {
                Span::styled("-", Style::default().fg(palette.muted))
            } else {
                Span::styled(
                    best.to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            };
            Line::from(vec![Span::raw(format!("{:<22}", id.title())), score])
        })
        .collect();

    let rankings = Paragraph::new(lines)
        .block(Block::default().title(" Best scores ").borders(Borders::ALL));
    f.render_widget(rankings, area);
}

fn draw_settings<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let theme = app.theme.theme();
    let lines = vec![
        Line::from(vec![
            Span::raw("Dark theme: "),
            Span::styled(
                if theme == Theme::DarkTheme { "on" } else { "off" },
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled("   [t] toggle", Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("Coins: {}", app.table.balance())),
            Span::styled("   [c] reset", Style::default().fg(palette.muted)),
        ]),
        Line::from(vec![
            Span::raw("Best scores"),
            Span::styled("   [s] reset", Style::default().fg(palette.muted)),
        ]),
    ];

    let settings =
        Paragraph::new(lines).block(Block::default().title(" Settings ").borders(Borders::ALL));
    f.render_widget(settings, area);
}

fn draw_logs<S: Storage>(f: &mut Frame, app: &App<S>, palette: &Palette, area: Rect) {
    let height = area.height.saturating_sub(2) as usize;
    let start = app.logs.len().saturating_sub(height);

    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .skip(start)
        .map(|log| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(palette.muted)),
                Span::raw(log.clone()),
            ])
        })
        .collect();

    let logs = Paragraph::new(log_lines)
        .block(
            Block::default()
                .title(" Log ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(logs, area);
}
