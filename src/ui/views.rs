use rand::Rng;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::app::{AppSnapshot, Channel, MENU_ENTRIES, Overlay, Speaker};
use crate::video::ClipId;

const PHOSPHOR: Color = Color::Rgb(0xc0, 0xff, 0xc0);
const DIM: Color = Color::DarkGray;

pub(super) fn draw_ui(f: &mut Frame, app: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let screen = Block::default()
        .borders(Borders::ALL)
        .title(" STATIC ")
        .style(Style::default().fg(DIM));
    let inner = screen.inner(chunks[0]);
    f.render_widget(screen, chunks[0]);

    match app.overlay {
        Overlay::None => draw_channel(f, inner, app),
        Overlay::Innocent => draw_photograph(f, inner, false),
        Overlay::Decay => draw_photograph(f, inner, true),
        Overlay::Clip(clip) => draw_clip(f, inner, clip),
    }

    draw_rack(f, chunks[1], app);
}

fn draw_channel(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    match app.channel {
        Channel::Off => {
            let p = Paragraph::new("\n\n[ p: power on    q: quit ]")
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().fg(DIM));
            f.render_widget(p, area);
        }
        Channel::StaticBoot => draw_static(f, area),
        Channel::SystemBoot => {
            let lines: Vec<Line> = app
                .boot_lines
                .iter()
                .map(|l| Line::from(Span::styled(*l, Style::default().fg(PHOSPHOR))))
                .collect();
            f.render_widget(Paragraph::new(lines), area);
        }
        Channel::Menu => draw_menu(f, area, app),
        Channel::Game => draw_game(f, area, app),
        Channel::Whispers => {
            let hint = if app.whispers_waiting {
                "\n\n...come closer...\n\n[ Enter: listen    Esc: back ]"
            } else {
                "\n\n. . ."
            };
            let p = Paragraph::new(hint)
                .alignment(ratatui::layout::Alignment::Center)
                .style(Style::default().fg(PHOSPHOR).add_modifier(Modifier::ITALIC));
            f.render_widget(p, area);
        }
        Channel::Confess => {
            // The confession clip renders through the overlay; nothing here.
        }
    }
}

/// A frame of white noise. Redrawn every tick, so it crawls.
fn draw_static(f: &mut Frame, area: Rect) {
    let mut rng = rand::thread_rng();
    let glyphs = [' ', '.', ':', '+', '*', '#', '%'];
    let lines: Vec<Line> = (0..area.height)
        .map(|_| {
            let row: String = (0..area.width)
                .map(|_| glyphs[rng.gen_range(0..glyphs.len())])
                .collect();
            Line::from(Span::styled(row, Style::default().fg(Color::Gray)))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_menu(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let items: Vec<ListItem> = MENU_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if i == app.menu_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(PHOSPHOR)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(PHOSPHOR)
            };
            ListItem::new(format!("  {entry}  ")).style(style)
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::NONE)
            .title(Line::from(Span::styled(
                "CHANNEL GUIDE",
                Style::default().fg(DIM),
            ))),
    );
    f.render_widget(list, area);
}

fn draw_game(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines: Vec<Line> = app
        .transcript
        .iter()
        .map(|l| {
            let (prefix, style) = match l.speaker {
                Speaker::Viewer => ("> ", Style::default().fg(Color::White)),
                Speaker::Tv => ("", Style::default().fg(PHOSPHOR)),
                Speaker::System => ("", Style::default().fg(DIM)),
            };
            Line::from(Span::styled(format!("{prefix}{}", l.text), style))
        })
        .collect();
    if app.is_typing {
        lines.push(Line::from(Span::styled(". . .", Style::default().fg(DIM))));
    }

    // Keep the tail of the conversation in view.
    let visible = chunks[0].height as usize;
    let skip = lines.len().saturating_sub(visible);
    let transcript = Paragraph::new(lines[skip..].to_vec()).wrap(Wrap { trim: false });
    f.render_widget(transcript, chunks[0]);

    let cursor = if app.input_locked { "" } else { "_" };
    let input = Paragraph::new(format!("> {}{cursor}", app.input))
        .style(Style::default().fg(Color::White));
    f.render_widget(input, chunks[1]);
}

fn draw_photograph(f: &mut Frame, area: Rect, decayed: bool) {
    let (caption, style) = if decayed {
        (
            "[ the photograph is rotting ]",
            Style::default().fg(Color::Red).add_modifier(Modifier::SLOW_BLINK),
        )
    } else {
        (
            "[ a photograph: a birthday party, 1974 ]",
            Style::default().fg(Color::White),
        )
    };
    let p = Paragraph::new(format!("\n\n\n{caption}"))
        .alignment(ratatui::layout::Alignment::Center)
        .style(style);
    f.render_widget(p, area);
}

fn draw_clip(f: &mut Frame, area: Rect, clip: ClipId) {
    let caption = match clip {
        ClipId::Party => "[ the party plays again. nobody moves. ]",
        ClipId::Whispers => "[ faces in the static. they know your name. ]",
        ClipId::Ritual => "[ the candles gutter. something leans in. ]",
    };
    let p = Paragraph::new(format!("\n\n\n{caption}"))
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(PHOSPHOR).add_modifier(Modifier::ITALIC));
    f.render_widget(p, area);
}

fn draw_rack(f: &mut Frame, area: Rect, app: &AppSnapshot) {
    let candle = |on: bool| if on { "◆" } else { "◇" };
    let music = if app.music_enabled { "MUSIC ON " } else { "MUSIC OFF" };
    let vol = if app.muted {
        "VOL --".to_owned()
    } else {
        format!("VOL {:>3.0}%", app.volume * 100.0)
    };
    let track = app
        .now_playing
        .map(|t| t.file_name().trim_end_matches(".mp3").to_owned())
        .unwrap_or_else(|| "-".to_owned());
    let knob = if app.knob_pulse { "◉" } else { "○" };

    let mut status = format!(
        " {knob}  {music}  {vol}  ♪ {track}   candles {} {}",
        candle(app.left_candle_on),
        candle(app.right_candle_on),
    );
    if let Some(toast) = &app.toast {
        status.push_str("   ! ");
        status.push_str(toast);
    }

    let rack = Paragraph::new(status)
        .block(Block::default().borders(Borders::ALL).title(" RACK "))
        .style(Style::default().fg(DIM));
    f.render_widget(rack, area);
}
