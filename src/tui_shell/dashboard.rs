use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::gate::{Badge, Capabilities};
use crate::model::AccountType;

use super::app::App;
use super::mock;

pub(super) fn draw(frame: &mut Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let (Some(user), Some(subscription)) = (session.user(), session.subscription()) else {
        return;
    };
    let account_type = session.account_type().unwrap_or(AccountType::Metatrader);
    let caps = Capabilities::derive(subscription, account_type);
    let badge = Badge::classify(subscription);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, rows[0], &user.email, subscription, badge, account_type);
    draw_panels(frame, rows[1], &caps);
    draw_footer(frame, rows[2], app, &caps);
}

fn badge_color(badge: Badge) -> Color {
    match badge {
        Badge::Ok => Color::Green,
        Badge::Expiring => Color::Yellow,
        Badge::Expired => Color::Red,
    }
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    email: &str,
    subscription: &crate::model::Subscription,
    badge: Badge,
    account_type: AccountType,
) {
    let header = Line::from(vec![
        Span::styled("Voltix", Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::raw(email.to_string()),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", account_type.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "{}/{} ({}d)",
                subscription.plan.label(),
                badge.label(),
                subscription.days_remaining
            ),
            Style::default().fg(badge_color(badge)),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_panels(frame: &mut Frame, area: Rect, caps: &Capabilities) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(cols[0]);
    draw_signals(frame, left[0]);
    draw_news(frame, left[1]);

    if caps.wallet_panel || caps.trade_panel {
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .split(cols[1]);
        draw_wallet(frame, right[0]);
        draw_positions(frame, right[1]);
    } else {
        let block = Block::default().borders(Borders::ALL).title("Trading");
        let inner = block.inner(cols[1]);
        frame.render_widget(block, cols[1]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "view-only access: trading panels unavailable",
                Style::default().fg(Color::Gray),
            ))),
            inner,
        );
    }
}

fn draw_signals(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Signals");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = mock::signals()
        .into_iter()
        .map(|s| {
            let side_color = if s.side == "BUY" {
                Color::Green
            } else {
                Color::Red
            };
            Line::from(vec![
                Span::raw(format!("{:<10}", s.pair)),
                Span::styled(format!("{:<5}", s.side), Style::default().fg(side_color)),
                Span::styled(
                    format!("{}%", s.confidence),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_news(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("News");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = mock::news()
        .into_iter()
        .map(|n| Line::from(format!("- {n}")))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_wallet(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Wallet");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("balance: "),
            Span::styled(mock::WALLET_BALANCE, Style::default().fg(Color::Green)),
        ])),
        inner,
    );
}

fn draw_positions(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Positions");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = mock::positions()
        .into_iter()
        .map(|p| {
            let pnl_color = if p.pnl.starts_with('+') {
                Color::Green
            } else {
                Color::Red
            };
            Line::from(vec![
                Span::raw(format!("{:<10}", p.symbol)),
                Span::raw(format!("{:<6}", p.side)),
                Span::raw(format!("{:<6}", p.size)),
                Span::styled(p.pnl.to_string(), Style::default().fg(pnl_color)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App, caps: &Capabilities) {
    let mut spans = vec![Span::styled(
        if caps.can_trade {
            "q quit   x sign out   r refresh"
        } else {
            "q quit   x sign out   r refresh   (view-only)"
        },
        Style::default().fg(Color::Gray),
    )];
    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::Gray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
