use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::entry::{EntryMode, EntryState};
use crate::model::AccountType;

use super::app::{App, FormField};

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let outer = Block::default().borders(Borders::ALL).title(Line::from(
        Span::styled("Voltix", Style::default().fg(Color::Yellow)),
    ));
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    if let Some(err) = &app.session_err {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            ))),
            inner,
        );
        return;
    }

    let Some(flow) = app.entry.as_ref() else {
        // Loading window: a persisted credential is being resolved.
        frame.render_widget(
            Paragraph::new("restoring session..."),
            centered(inner, 40, 1),
        );
        return;
    };

    match flow.state() {
        EntryState::SelectingMode => draw_selection(frame, app, inner),
        EntryState::CredentialEntry(mode) => draw_form(frame, app, inner, mode),
        EntryState::ExchangePending => {
            frame.render_widget(
                Paragraph::new("exchanging identity with provider..."),
                centered(inner, 44, 1),
            );
        }
        EntryState::Authenticated => {}
    }

    if app.assertion_input.is_some() {
        draw_assertion_prompt(frame, app, inner);
    }
}

fn draw_selection(frame: &mut Frame, app: &App, area: Rect) {
    let Some(flow) = app.entry.as_ref() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let mut spans = vec![Span::raw("account type:  ")];
    for ty in AccountType::ALL {
        let style = if ty == flow.account_type() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{}]", ty.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let mut lines = vec![Line::from(Span::styled(
        "l login   r register   g sign in with google   ←/→ account type   q quit",
        Style::default().fg(Color::Gray),
    ))];
    if !flow.account_type().supports_trading() {
        lines.push(Line::from(Span::styled(
            "gmail accounts are view-only (no trading)",
            Style::default().fg(Color::Gray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), rows[1]);

    if let Some(err) = flow.error() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ))),
            rows[2],
        );
    } else if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(Color::Gray),
            ))),
            rows[2],
        );
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect, mode: EntryMode) {
    let Some(flow) = app.entry.as_ref() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let title = match mode {
        EntryMode::Login => "Sign in",
        EntryMode::Register => "Create account",
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(title, Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(
                format!("({})", flow.account_type().label()),
                Style::default().fg(Color::Gray),
            ),
        ])),
        rows[0],
    );

    frame.render_widget(
        field_line("email", &app.email_input.buf, app.focus == FormField::Email),
        rows[1],
    );
    let masked = "*".repeat(app.password_input.buf.chars().count());
    frame.render_widget(
        field_line("password", &masked, app.focus == FormField::Password),
        rows[2],
    );

    if flow.in_flight() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "signing in...",
                Style::default().fg(Color::Gray),
            ))),
            rows[3],
        );
    } else if let Some(err) = flow.error() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ))),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "enter submit   tab switch field   ctrl+r toggle login/register   esc back",
            Style::default().fg(Color::Gray),
        ))),
        rows[4],
    );
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Paragraph<'a> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label:>8}: "), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), value_style),
    ]))
}

fn draw_assertion_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let Some(input) = app.assertion_input.as_ref() else {
        return;
    };
    let popup = centered(area, area.width.saturating_sub(8).min(64), 3);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("identity assertion (enter submit, esc cancel)");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(Paragraph::new(input.buf.clone()), inner);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
