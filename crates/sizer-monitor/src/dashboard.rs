//! Interactive sizing dashboard using ratatui.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use rust_decimal::Decimal;
use sizer_core::{CappedTable, SizingError, TableRequest};
use sizer_risk::PositionSizer;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tracing::debug;

use crate::format::{format_currency, format_fraction_pct, format_pct, format_shares};
use crate::TableView;

const MAX_MESSAGES: usize = 50;

/// What the dashboard should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Dashboard state: the current inputs and the table computed from them.
pub struct DashboardState {
    pub request: TableRequest,
    pub view: TableView,
    pub price_step: Decimal,
    pub outcome: Result<CappedTable, SizingError>,
    pub messages: VecDeque<String>,
}

impl DashboardState {
    pub fn new(request: TableRequest, view: TableView, price_step: Decimal) -> Self {
        let outcome = compute(&request);
        Self {
            request,
            view,
            price_step,
            outcome,
            messages: VecDeque::new(),
        }
    }

    /// Apply a key press, recomputing the table when an input changed.
    pub fn handle_key(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            KeyCode::Char('v') => {
                self.view = self.view.toggle();
                self.log(format!("View: {}", self.view));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.move_entry(self.price_step),
            KeyCode::Char('-') => self.move_entry(-self.price_step),
            KeyCode::Char(']') => self.move_stop(self.price_step),
            KeyCode::Char('[') => self.move_stop(-self.price_step),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn move_entry(&mut self, delta: Decimal) {
        self.request.trade.entry_price += delta;
        self.log(format!("Entry: {}", format_currency(self.request.trade.entry_price)));
        self.recompute();
    }

    fn move_stop(&mut self, delta: Decimal) {
        self.request.trade.stop_price += delta;
        self.log(format!("Stop: {}", format_currency(self.request.trade.stop_price)));
        self.recompute();
    }

    fn recompute(&mut self) {
        self.outcome = compute(&self.request);
        if let Err(e) = &self.outcome {
            let message = e.to_string();
            self.log(message);
        }
    }

    fn log(&mut self, message: String) {
        debug!(%message, "Dashboard event");
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

fn compute(request: &TableRequest) -> Result<CappedTable, SizingError> {
    PositionSizer::from_request(request).capped_table(&request.trade)
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until the user quits.
    pub fn run(&self, state: &mut DashboardState) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        state: &mut DashboardState,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.ui(f, &*state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && state.handle_key(key.code) == KeyOutcome::Quit
                    {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Inputs
                Constraint::Min(9),    // Table
                Constraint::Length(7), // Messages
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_inputs(frame, chunks[1], state);
        self.render_table(frame, chunks[2], state);
        self.render_messages(frame, chunks[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Position Sizer",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(state.view.label(), Style::default().fg(Color::Cyan)),
            Span::raw(" | +/- entry  [/] stop  v view  q quit"),
        ])])
        .block(Block::default().borders(Borders::ALL).title("Sizer"));
        frame.render_widget(header, area);
    }

    fn render_inputs(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let trade = &state.request.trade;
        let mut lines = vec![Line::from(vec![
            Span::raw("Portfolio: "),
            Span::styled(
                format_currency(trade.portfolio_value),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Entry: "),
            Span::raw(format_currency(trade.entry_price)),
            Span::raw("  |  Stop: "),
            Span::raw(format_currency(trade.stop_price)),
        ])];

        match &state.outcome {
            Ok(table) => lines.push(Line::from(vec![
                Span::raw(format!("{}  |  Stop distance: ", table.direction)),
                Span::raw(format!(
                    "{} ({})",
                    format_currency(table.per_share_risk),
                    format_pct(table.stop_distance_pct)
                )),
                Span::raw("  |  Heat cap: "),
                Span::raw(format_currency(table.heat_cap_budget)),
                Span::raw("  |  Position cap: "),
                Span::raw(format_currency(table.position_value_cap)),
            ])),
            Err(e) => lines.push(Line::from(Span::styled(
                e.to_string(),
                Style::default().fg(Color::Red),
            ))),
        }

        let inputs =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Inputs"));
        frame.render_widget(inputs, area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let table = match &state.outcome {
            Ok(table) => table,
            Err(_) => {
                let empty = Paragraph::new("No sizes: fix the inputs above.")
                    .block(Block::default().borders(Borders::ALL).title("Sizes"));
                frame.render_widget(empty, area);
                return;
            }
        };

        let header_cells = ["Risk", "Intended", "Final", "Value", "Heat", "Heat %", "Limiting"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = state.view.sorted_rows(&table.rows).into_iter().map(|row| {
            let final_color = if row.final_shares.is_zero() {
                Color::Red
            } else if row.final_shares < row.intended_shares {
                Color::Yellow
            } else {
                Color::Green
            };

            Row::new(vec![
                Cell::from(format_fraction_pct(row.risk_pct)),
                Cell::from(format_shares(row.intended_shares)),
                Cell::from(format_shares(row.final_shares))
                    .style(Style::default().fg(final_color)),
                Cell::from(format_currency(row.position_value)),
                Cell::from(format_currency(row.heat)),
                Cell::from(format_pct(row.heat_pct)),
                Cell::from(row.limiting.label()),
            ])
        });

        let title = if table.any_zero_shares {
            "Sizes (some levels size to zero shares)"
        } else {
            "Sizes"
        };

        let widget = Table::new(
            rows,
            [
                Constraint::Percentage(10),
                Constraint::Percentage(12),
                Constraint::Percentage(12),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
                Constraint::Percentage(10),
                Constraint::Percentage(26),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));

        frame.render_widget(widget, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(5)
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sizer_core::{ErrorKind, TradeParameters};

    fn state() -> DashboardState {
        let request = TableRequest::new(
            TradeParameters::new(dec!(50000), dec!(100), dec!(99.8)),
            dec!(0.01),
            dec!(0.25),
        );
        DashboardState::new(request, TableView::ByRisk, dec!(0.1))
    }

    #[test]
    fn test_initial_state_is_computed() {
        let state = state();
        let table = state.outcome.as_ref().unwrap();
        assert_eq!(table.rows.len(), 5);
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut state = state();
        assert_eq!(state.handle_key(KeyCode::Char('q')), KeyOutcome::Quit);
        assert_eq!(state.handle_key(KeyCode::Esc), KeyOutcome::Quit);
        assert_eq!(state.handle_key(KeyCode::Char('x')), KeyOutcome::Continue);
    }

    #[test]
    fn test_toggle_view() {
        let mut state = state();
        state.handle_key(KeyCode::Char('v'));
        assert_eq!(state.view, TableView::ByHeat);
        assert_eq!(state.messages.len(), 1);
    }

    #[test]
    fn test_moving_stop_recomputes() {
        let mut state = state();
        state.handle_key(KeyCode::Char('['));
        assert_eq!(state.request.trade.stop_price, dec!(99.7));
        let table = state.outcome.as_ref().unwrap();
        assert_eq!(table.per_share_risk, dec!(0.3));
    }

    #[test]
    fn test_entry_meeting_stop_shows_error() {
        let mut state = state();
        state.handle_key(KeyCode::Char('-'));
        state.handle_key(KeyCode::Char('-'));
        assert_eq!(state.request.trade.entry_price, dec!(99.8));
        let err = state.outcome.as_ref().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroRiskDistance);
        assert!(state.messages.back().unwrap().contains("Stop loss price"));

        state.handle_key(KeyCode::Char('+'));
        assert!(state.outcome.is_ok());
    }

    #[test]
    fn test_messages_keep_the_latest() {
        let mut state = state();
        for _ in 0..MAX_MESSAGES + 3 {
            state.handle_key(KeyCode::Char('v'));
        }
        assert_eq!(state.messages.len(), MAX_MESSAGES);
        // The first three toggles were dropped, so the oldest kept is the fourth
        assert_eq!(state.messages.front().unwrap(), "View: risk % ascending");
        assert_eq!(state.messages.back().unwrap(), "View: heat % descending");
    }
}
