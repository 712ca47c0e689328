use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use crate::action::{Action, Direction};
use crate::bridge::MetricsBackend;
use crate::config::{Config, Timing, parse_key};
use crate::event::{Event, EventSender, RefreshCause, RefreshTimer};
use crate::system::history::CpuHistory;
use crate::system::snapshot::{Reading, Snapshot};
use crate::ui::theme::Theme;
use crate::view::{DEFAULT_UPTIME, DashboardError, DashboardView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, timers not armed yet.
    Uninitialized,
    /// Startup refresh scheduled and polling interval running. Never left.
    Polling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    PidEntry,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
}

/// Modal message; blocks every other key until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            message: message.into(),
        }
    }
}

/// What a completed fetch did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Applied,
    Skipped,
    Faulted,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub kill: KeyCode,
    pub pid_input: KeyCode,
    pub refresh: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            pid_input: parse_key(&kb.pid_input).unwrap_or(KeyCode::Char('p')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.kill), "Kill selected process"),
            (key_label(self.pid_input), "Kill by PID"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Select row"));
        entries.push(("Home/End".to_string(), "First/last row"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

/// Parses the manual PID field: a positive integer, surrounding whitespace
/// ignored. Zero, negatives and anything non-numeric are rejected.
pub fn parse_pid(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|pid| *pid != 0)
}

/// Runs one fetch on its own task. A panicking or overdue fetch resolves to
/// `None` so the completion event is always delivered.
async fn fetch_with_limit<B: MetricsBackend>(
    bridge: Arc<B>,
    limit: Duration,
) -> Option<Snapshot> {
    let mut fetch = tokio::spawn(async move { bridge.fetch_snapshot().await });
    match tokio::time::timeout(limit, &mut fetch).await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "snapshot fetch task failed");
            None
        }
        Err(_) => {
            fetch.abort();
            tracing::warn!(
                limit_ms = limit.as_millis() as u64,
                "snapshot fetch timed out"
            );
            None
        }
    }
}

pub struct DashboardOptions {
    pub timing: Timing,
    pub history_length: usize,
    pub max_rows: usize,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
}

impl DashboardOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timing: config.general.timing(),
            history_length: config.general.history_length,
            max_rows: config.general.max_table_rows,
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        }
    }
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Screen geometry of the process table from the last draw, for mouse hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHitArea {
    pub body: Rect,
    pub kill_columns: Range<u16>,
}

pub struct Dashboard<B: MetricsBackend> {
    pub running: bool,
    pub phase: Phase,
    pub view: DashboardView,
    pub cpu_history: CpuHistory,
    pub input_mode: InputMode,
    pub pid_input: String,
    pub alert: Option<Alert>,
    pub table_state: TableState,
    pub table_hit: Option<TableHitArea>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    pub(crate) last_update: Option<Instant>,
    pub skipped_cycles: u64,
    last_outcome: Option<CycleOutcome>,
    bridge: Arc<B>,
    timer: RefreshTimer,
    timing: Timing,
    in_flight: bool,
    pending: Option<RefreshCause>,
}

impl<B: MetricsBackend> Dashboard<B> {
    pub fn new(bridge: Arc<B>, events: EventSender, options: DashboardOptions) -> Self {
        let cpu_history = CpuHistory::new(options.history_length);
        let view = DashboardView::new(cpu_history.capacity(), options.max_rows);

        Dashboard {
            running: true,
            phase: Phase::Uninitialized,
            view,
            cpu_history,
            input_mode: InputMode::Normal,
            pid_input: String::new(),
            alert: None,
            table_state: TableState::default(),
            table_hit: None,
            theme: options.theme,
            keybinds: options.keybinds,
            last_update: None,
            skipped_cycles: 0,
            last_outcome: None,
            bridge,
            timer: RefreshTimer::new(events),
            timing: options.timing,
            in_flight: false,
            pending: None,
        }
    }

    /// Schedules the delayed first refresh and arms the polling interval.
    /// Only the first call has an effect.
    pub fn initialize(&mut self) {
        if self.phase == Phase::Polling {
            return;
        }
        self.timer
            .schedule_once(self.timing.startup_delay, RefreshCause::Startup);
        self.timer.arm_interval(self.timing.poll_interval);
        self.phase = Phase::Polling;
        tracing::info!(
            startup_delay_ms = self.timing.startup_delay.as_millis() as u64,
            poll_interval_ms = self.timing.poll_interval.as_millis() as u64,
            "dashboard polling armed"
        );
    }

    /// Starts a fetch unless one is already outstanding, in which case the
    /// request is folded into a single follow-up fetch.
    pub fn refresh(&mut self, cause: RefreshCause) {
        if self.phase == Phase::Uninitialized {
            tracing::debug!(?cause, "refresh before initialization ignored");
            return;
        }
        if self.in_flight {
            if self.pending.is_none() {
                tracing::debug!(?cause, "fetch in flight, coalescing refresh");
            }
            self.pending.get_or_insert(cause);
            return;
        }

        self.in_flight = true;
        let bridge = Arc::clone(&self.bridge);
        let tx = self.timer.sender().clone();
        let limit = self.timing.poll_interval;
        tokio::spawn(async move {
            let snapshot = fetch_with_limit(bridge, limit).await;
            let _ = tx.send(Event::Snapshot(snapshot));
        });
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// The data on screen is out of date: the latest fetch did not apply, or
    /// nothing has applied for two polling periods.
    pub fn is_stale(&self) -> bool {
        if matches!(self.last_outcome, Some(o) if o != CycleOutcome::Applied) {
            return true;
        }
        match self.last_update {
            Some(at) => at.elapsed() > self.timing.poll_interval * 2,
            None => self.skipped_cycles > 0,
        }
    }

    /// Completion of the outstanding fetch.
    pub fn on_snapshot(&mut self, snapshot: Option<Snapshot>) -> CycleOutcome {
        self.in_flight = false;
        let outcome = self.apply_snapshot(snapshot);
        self.last_outcome = Some(outcome);
        if let Some(cause) = self.pending.take() {
            self.refresh(cause);
        }
        outcome
    }

    pub fn apply_snapshot(&mut self, snapshot: Option<Snapshot>) -> CycleOutcome {
        let Some(snapshot) = snapshot else {
            self.skipped_cycles += 1;
            tracing::warn!("no data received yet, skipping update");
            return CycleOutcome::Skipped;
        };
        let reading = match snapshot.validate() {
            Ok(reading) => reading,
            Err(e) => {
                self.skipped_cycles += 1;
                tracing::warn!(error = %e, "incomplete snapshot, skipping update");
                return CycleOutcome::Skipped;
            }
        };

        let outcome = match self.render_reading(&reading) {
            Ok(()) => {
                self.last_update = Some(Instant::now());
                CycleOutcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "error updating dashboard");
                CycleOutcome::Faulted
            }
        };
        self.clamp_selection();
        outcome
    }

    fn render_reading(&mut self, reading: &Reading) -> Result<(), DashboardError> {
        self.view.cpu_bar.set("cpu", reading.cpu)?;
        self.view.mem_bar.set("mem", reading.mem)?;
        self.view.uptime_text = reading
            .uptime
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_UPTIME)
            .to_string();

        self.cpu_history.push(reading.cpu);
        self.view.cpu_chart.update(self.cpu_history.points());

        self.view.cpu_gauge.set("cpu", reading.cpu)?;
        self.view.mem_gauge.set("mem", reading.mem)?;

        self.view.proc_table.rebuild(&reading.processes)
    }

    pub fn kill_by_row(&mut self, pid: u32) {
        tracing::info!(pid, "kill requested from process table");
        self.bridge.kill_process(pid);
        self.timer
            .schedule_once(self.timing.kill_refresh_delay, RefreshCause::AfterKill);
    }

    pub fn kill_manual(&mut self) {
        let Some(pid) = parse_pid(&self.pid_input) else {
            tracing::debug!(input = %self.pid_input, "rejected manual PID");
            self.alert = Some(Alert::error("Please enter a valid PID!"));
            return;
        };
        tracing::info!(pid, "kill requested by PID");
        self.bridge.kill_process(pid);
        self.alert = Some(Alert::info(format!(
            "Process {pid} terminated (if permissions allow)."
        )));
        self.pid_input.clear();
        self.input_mode = InputMode::Normal;
        self.timer
            .schedule_once(self.timing.kill_refresh_delay, RefreshCause::AfterKill);
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if self.alert.is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Action::DismissAlert,
                _ => Action::None,
            };
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::PidEntry => self.map_key_pid(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Row navigation is hardwired (not configurable)
        match code {
            KeyCode::Up => return Action::SelectRow(Direction::Up),
            KeyCode::Down => return Action::SelectRow(Direction::Down),
            KeyCode::Home => return Action::SelectRow(Direction::First),
            KeyCode::End => return Action::SelectRow(Direction::Last),
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.kill {
            return match self.selected_pid() {
                Some(pid) => Action::KillRow(pid),
                None => Action::None,
            };
        }
        if code == kb.pid_input {
            return Action::FocusPidInput;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_pid(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::LeavePidInput,
            KeyCode::Enter => Action::SubmitPidInput,
            KeyCode::Backspace => {
                let mut text = self.pid_input.clone();
                text.pop();
                Action::UpdatePidInput(text)
            }
            KeyCode::Char(c) => {
                let mut text = self.pid_input.clone();
                text.push(c);
                Action::UpdatePidInput(text)
            }
            _ => Action::None,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn map_mouse(&self, mouse: MouseEvent) -> Action {
        if self.alert.is_some() || self.input_mode != InputMode::Normal {
            return Action::None;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Action::Click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp => Action::SelectRow(Direction::Up),
            MouseEventKind::ScrollDown => Action::SelectRow(Direction::Down),
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SelectRow(dir) => self.select_row(dir),
            Action::KillRow(pid) => {
                if pid != 0 {
                    self.kill_by_row(pid);
                }
            }
            Action::FocusPidInput => self.input_mode = InputMode::PidEntry,
            Action::LeavePidInput => self.input_mode = InputMode::Normal,
            Action::UpdatePidInput(text) => self.pid_input = text,
            Action::SubmitPidInput => self.kill_manual(),
            Action::DismissAlert => self.alert = None,
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::Refresh => self.refresh(RefreshCause::Manual),
            Action::Click(col, row) => self.click(col, row),
            Action::None => {}
        }
    }

    fn select_row(&mut self, direction: Direction) {
        let len = self.view.proc_table.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = match direction {
            Direction::Up => current.saturating_sub(1),
            Direction::Down => (current + 1).min(len - 1),
            Direction::First => 0,
            Direction::Last => len - 1,
        };
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.view.proc_table.len();
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.table_state.select(selected);
    }

    fn click(&mut self, col: u16, row: u16) {
        let Some(hit) = self.table_hit.clone() else {
            return;
        };
        let body = hit.body;
        if col < body.x || col >= body.x + body.width || row < body.y || row >= body.y + body.height
        {
            return;
        }

        let index = self.table_state.offset() + (row - body.y) as usize;
        let Some(pid) = self.view.proc_table.pid_at(index) else {
            return;
        };
        self.table_state.select(Some(index));
        if hit.kill_columns.contains(&col) {
            self.kill_by_row(pid);
        }
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.table_state
            .selected()
            .and_then(|i| self.view.proc_table.pid_at(i))
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }
}
