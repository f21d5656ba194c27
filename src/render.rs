//! NovaCoin rendering: the terminal widget tree and its click targets.
//!
//! Pure presentation: everything shown here is read from the save state or
//! the transient UI state, and every interactive element registers a click
//! target so touch input works everywhere keyboard input does.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions;
use crate::catalog;
use crate::input::{is_narrow_layout, ClickState};
use crate::state::SaveState;
use crate::ui::UiState;
use crate::widgets::ClickableList;

/// Coin art frames, cycled while producers are running.
const COIN_ART: &[&[&str]] = &[
    &["╭──◆──╮", "│ N C │", "╰──◆──╯"],
    &["╭──◇──╮", "│ N C │", "╰──◇──╯"],
];

/// Coin art while a click flash is live.
const COIN_CLICK_ART: &[&str] = &["╭◆◆◆◆◆╮", "◆ N C ◆", "╰◆◆◆◆◆╯"];

/// Spinner characters for the production indicator.
const SPINNER: &[char] = &['◴', '◷', '◶', '◵'];

pub fn render(state: &SaveState, ui: &UiState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // balance header
            Constraint::Min(8),    // content
            Constraint::Length(3), // help bar
        ])
        .split(area);

    render_header(state, ui, f, chunks[0]);

    if ui.show_shop {
        if is_narrow_layout(area.width) {
            render_shop(state, f, chunks[1], cs);
        } else {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[1]);
            render_main(state, ui, f, split[0], cs);
            render_shop(state, f, split[1], cs);
        }
    } else {
        render_main(state, ui, f, chunks[1], cs);
    }

    render_help(state, ui, f, chunks[2], cs);
}

fn render_main(state: &SaveState, ui: &UiState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let stats_height = if ui.show_stats { 8 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),            // coin panel
            Constraint::Length(4),            // upgrade buttons
            Constraint::Length(stats_height), // stats table
            Constraint::Min(0),
        ])
        .split(area);

    render_coin_panel(state, ui, f, chunks[0], cs);
    render_upgrades(state, f, chunks[1], cs);
    if ui.show_stats {
        render_stats(state, f, chunks[2]);
    }
}

fn render_header(state: &SaveState, ui: &UiState, f: &mut Frame, area: Rect) {
    let balance_style = if ui.purchase_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if ui.click_flash > 0 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} NC ", format_number(state.stats.balance)),
            balance_style,
        ),
        Span::styled(
            format!(" +{}/クリック", format_number(state.click_yield())),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" NovaCoin "),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// The coin itself. The whole panel is one big click target.
fn render_coin_panel(
    state: &SaveState,
    ui: &UiState,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
) {
    let art: &[&str] = if ui.click_flash > 0 {
        COIN_CLICK_ART
    } else {
        COIN_ART[(ui.anim_frame / 5) as usize % COIN_ART.len()]
    };

    let mut lines: Vec<Line> = art
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Yellow))))
        .collect();

    let production = state.production_per_tick();
    if production > 0 {
        let spinner = SPINNER[(ui.anim_frame / 2) as usize % SPINNER.len()];
        let interval_ms = state.tick_interval_ms().unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!("{spinner} +{} / {}ms", format_number(production), interval_ms),
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "タップして採掘",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let border_color = if ui.click_flash > 0 {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .alignment(Alignment::Center);
    f.render_widget(panel, area);

    cs.add_target(area, actions::CLICK_COIN);
}

fn render_upgrades(state: &SaveState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    for (idx, def) in catalog::UPGRADES.iter().enumerate() {
        let owned = match state.upgrades.get(def.id) {
            Some(owned) => owned,
            None => continue,
        };
        let affordable = state.stats.balance >= owned.cost;
        let cost_style = if affordable {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", idx + 1),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(def.display_name, Style::default().fg(Color::White)),
                Span::styled(
                    format!(" Lv.{}", owned.level),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("  {} NC", format_number(owned.cost)), cost_style),
            ]),
            actions::BUY_UPGRADE_BASE + idx as u16,
        );
    }

    cl.register_targets(area, cs, 1, 1, None);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" アップグレード "),
    );
    f.render_widget(widget, area);
}

fn render_stats(state: &SaveState, f: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White);
    let row = |label: &str, text: String| {
        Line::from(vec![
            Span::styled(format!(" {label:<12}"), dim),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![
        row("総採掘量", format!("{} NC", format_number(state.stats.total_produced))),
        row("総クリック", format_number(state.stats.total_clicks)),
        row("クリック単価", format!("{} NC", format_number(state.click_yield()))),
        row("クリック倍率", format!("x{:.1}", state.stats.click_multiplier)),
        row("生産倍率", format!("x{:.1}", state.stats.production_multiplier)),
    ];
    for def in catalog::PRODUCERS {
        if let Some(p) = state.producers.get(def.id) {
            lines.push(row(def.display_name, format!("{} 台", p.count)));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" 統計 "),
    );
    f.render_widget(widget, area);
}

/// Shop overlay: one card per unlocked, unowned item.
fn render_shop(state: &SaveState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let inner_width = area.width.saturating_sub(2);
    let mut cl = ClickableList::new();

    cl.push_clickable(
        Line::from(Span::styled(
            " [X] 閉じる",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        actions::CLOSE_SHOP,
    );
    cl.push(Line::from(""));

    let mut shown = 0usize;
    for (idx, def) in catalog::ITEMS.iter().enumerate() {
        if state.item_purchased(def.id) || state.stats.total_produced < def.unlock_threshold {
            continue;
        }
        shown += 1;
        let key = (b'a' + (shown - 1) as u8) as char;
        let affordable = state.stats.balance >= def.price;
        let price_style = if affordable {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        cl.push(Line::from(Span::styled(
            def.display_name,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        cl.push(Line::from(Span::styled(
            def.description,
            Style::default().fg(Color::Gray),
        )));
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{key}] 購入 "),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{} NC", format_number(def.price)), price_style),
            ]),
            actions::BUY_ITEM_BASE + idx as u16,
        );
        cl.push(Line::from(""));
    }

    if shown == 0 {
        cl.push(Line::from(Span::styled(
            "品切れ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )));
        cl.push(Line::from(Span::styled(
            "最高の設備が揃っている。採掘を続ければ新しい品が並ぶ。",
            Style::default().fg(Color::Gray),
        )));
    }

    cl.register_targets(area, cs, 1, 1, Some(inner_width));
    let widget = Paragraph::new(cl.into_lines())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" ショップ "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help(state: &SaveState, ui: &UiState, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let (shop_label, shop_action) = if ui.show_shop {
        ("[S] ショップを閉じる".to_string(), actions::CLOSE_SHOP)
    } else {
        (
            format!("[S] ショップ ({})", state.available_items().len()),
            actions::OPEN_SHOP,
        )
    };
    hint(f, chunks[0], &shop_label, Color::Yellow, shop_action, cs);

    let stats_label = if ui.show_stats { "[T] 統計を隠す" } else { "[T] 統計" };
    hint(f, chunks[1], stats_label, Color::Blue, actions::TOGGLE_STATS, cs);

    let (reset_label, reset_color) = if ui.reset_armed > 0 {
        ("[R] 本当にリセット？", Color::Red)
    } else {
        ("[R] リセット", Color::DarkGray)
    };
    hint(f, chunks[2], reset_label, reset_color, actions::HARD_RESET, cs);
}

fn hint(f: &mut Frame, area: Rect, text: &str, color: Color, action: u16, cs: &mut ClickState) {
    let widget = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(widget, area);
    cs.add_target(area, action);
}

/// Group digits with commas: 1234567 → "1,234,567".
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
