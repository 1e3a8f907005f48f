use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::app::App;
use crate::greetings::{Recipient, Tone};
use crate::i18n::SUPPORTED_LANGUAGES;
use crate::models::Screen;
use crate::theme::Theme;

/// Renders the whole frame for the current screen.
pub fn render(f: &mut Frame, app: &App) {
    let theme = Theme::for_mode(app.theme_mode);
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(theme.root_bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    render_header(f, app, &theme, chunks[0]);
    match app.screen {
        Screen::Intro => render_intro(f, app, &theme, chunks[1]),
        Screen::Recipient => render_recipients(f, app, &theme, chunks[1]),
        Screen::Tone => render_tones(f, app, &theme, chunks[1]),
        Screen::Result => render_result(f, app, &theme, chunks[1]),
    }
    render_footer(f, app, &theme, chunks[2]);

    if app.lang_menu.visible {
        render_language_menu(f, app, &theme);
    }
    if let Some(toast) = &app.toast {
        render_toast(f, &toast.text, &theme);
    }
}

fn render_header(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let indicator = format!(
        "{} [{}]",
        app.theme_mode.indicator(),
        app.i18n.current_language()
    );
    let line = Line::from(vec![
        Span::styled(format!("🧧 {}", app.label("app.title")), theme.title),
        Span::raw("  "),
        Span::styled(indicator, Style::default().fg(theme.text_secondary)),
    ]);
    let header = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme.blurred_border)));
    f.render_widget(header, area);
}

fn render_intro(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let (main, history_area) = split_history(app, area);

    // particles go underneath the text
    for p in &app.particles {
        let x = main.x + percent_of(main.width.saturating_sub(2), p.column_pct);
        let y = main.y + percent_of(main.height.saturating_sub(1), p.row_pct);
        let cell = Rect { x, y, width: 2, height: 1 }.intersection(main);
        f.render_widget(Paragraph::new(p.glyph).style(theme.decoration), cell);
    }

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(app.label("app.title"), theme.title)),
        Line::from(""),
        Line::from(Span::styled(app.label("intro.subtitle"), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ Enter ] {}", app.label("intro.start")),
            Style::default().fg(theme.selection_fg).bg(theme.selection_bg).add_modifier(Modifier::BOLD),
        )),
    ];
    let intro = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let inner = centered_rect(80, 60, main);
    f.render_widget(intro, inner);

    if let Some(history_area) = history_area {
        render_history(f, app, theme, history_area);
    }
}

fn render_recipients(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = Recipient::ALL
        .iter()
        .map(|r| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}  ", r.icon())),
                Span::styled(app.label(&r.label_key()), Style::default().fg(theme.text)),
            ]))
        })
        .collect();
    render_choice_list(f, app, theme, area, app.label("recipient.title"), items);
}

fn render_tones(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = Tone::ALL
        .iter()
        .map(|t| ListItem::new(Span::styled(app.label(&t.label_key()), Style::default().fg(theme.text))))
        .collect();
    render_choice_list(f, app, theme, area, app.label("tone.title"), items);
}

fn render_choice_list(
    f: &mut Frame,
    app: &App,
    theme: &Theme,
    area: Rect,
    title: String,
    items: Vec<ListItem>,
) {
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.focus_border)),
        )
        .highlight_style(Style::default().fg(theme.selection_fg).bg(theme.selection_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");
    let mut state = ListState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(list, centered_rect(60, 90, area), &mut state);
}

fn render_result(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let (main, history_area) = split_history(app, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(main);

    let info = Paragraph::new(Span::styled(app.result_info(), theme.result_info));
    f.render_widget(info, chunks[0]);

    let block = Block::default()
        .title(app.label("result.title"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.focus_border));

    if app.current_greetings.is_empty() {
        let empty = Paragraph::new(app.label("result.empty"))
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary));
        f.render_widget(empty, chunks[1]);
    } else {
        let copy = app.label("button.copy");
        let share = app.label("button.share");
        let copied = app.label("greeting.copied");
        let mut lines = Vec::new();
        for (i, text) in app.current_greetings.iter().enumerate() {
            let selected = i == app.cursor;
            let marker = if selected { "→" } else { " " };
            let text_style = if selected {
                theme.card_text.fg(theme.text_highlight).add_modifier(Modifier::BOLD)
            } else {
                theme.card_text
            };
            lines.push(Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(format!("{}. ", i + 1), theme.card_number),
                Span::styled(text.clone(), text_style),
            ]));
            let badge = match &app.copied {
                Some(c) if c.index == i => Span::styled(format!("✅ {copied}"), theme.copied_badge),
                _ => Span::styled(format!("📋 {copy}"), Style::default().fg(theme.text_secondary)),
            };
            lines.push(Line::from(vec![
                Span::raw("     "),
                badge,
                Span::raw("  "),
                Span::styled(format!("🔗 {share}"), Style::default().fg(theme.text_secondary)),
            ]));
            lines.push(Line::from(""));
        }
        let cards = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        f.render_widget(cards, chunks[1]);
    }

    if let Some(history_area) = history_area {
        render_history(f, app, theme, history_area);
    }
}

/// Carves a history panel off the bottom when there is history to show.
fn split_history(app: &App, area: Rect) -> (Rect, Option<Rect>) {
    if app.history.is_empty() {
        return (area, None);
    }
    let height = (app.history.len() as u16 + 2).min(area.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(height)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn render_history(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = app
        .history
        .entries()
        .iter()
        .map(|text| ListItem::new(Span::styled(text.clone(), theme.history_item)))
        .collect();
    let title = format!("{} (x: {})", app.label("history.title"), app.label("history.clear"));
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.blurred_border)),
    );
    f.render_widget(list, area);
}

fn render_footer(f: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let key = match app.screen {
        Screen::Intro => "footer.intro",
        Screen::Recipient | Screen::Tone => "footer.select",
        Screen::Result => "footer.result",
    };
    let footer = Paragraph::new(app.label(key))
        .block(Block::default().borders(Borders::ALL))
        .style(theme.footer);
    f.render_widget(footer, area);
}

fn render_language_menu(f: &mut Frame, app: &App, theme: &Theme) {
    let area = centered_rect(30, 60, f.area());
    f.render_widget(Clear, area);
    let current = app.i18n.current_language();
    let items: Vec<ListItem> = SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| {
            let mark = if *lang == current { "●" } else { " " };
            ListItem::new(format!("{mark} {lang}"))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(app.label("lang.title"))
                .borders(Borders::ALL)
                .style(theme.popup_border),
        )
        .highlight_style(Style::default().fg(theme.selection_fg).bg(theme.selection_bg))
        .highlight_symbol("→ ");
    let mut state = ListState::default();
    state.select(Some(app.lang_menu.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_toast(f: &mut Frame, text: &str, theme: &Theme) {
    let full = f.area();
    let width = (text.chars().count() as u16 * 2 + 4).min(full.width);
    let area = Rect {
        x: full.x + (full.width - width) / 2,
        y: full.y + full.height.saturating_sub(5),
        width,
        height: 1,
    }
    .intersection(full);
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text.to_string()).alignment(Alignment::Center).style(theme.toast),
        area,
    );
}

// u32 so wide terminals cannot overflow
fn percent_of(len: u16, pct: u16) -> u16 {
    (u32::from(len) * u32::from(pct.min(100)) / 100) as u16
}

/// Centers a rectangle within another rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default().direction(Direction::Vertical)
        .constraints([Constraint::Percentage((100-percent_y)/2), Constraint::Percentage(percent_y), Constraint::Percentage((100-percent_y)/2)]).split(r)[1];
    Layout::default().direction(Direction::Horizontal)
        .constraints([Constraint::Percentage((100-percent_x)/2), Constraint::Percentage(percent_x), Constraint::Percentage((100-percent_x)/2)]).split(vertical)[1]
}
