//! Widget state owned by the dashboard controller.
//!
//! These types hold what is on screen, independent of how it is drawn: the
//! renderer in the `ui` module only reads them. Every numeric input is checked for
//! finiteness before it lands in a widget.

use thiserror::Error;

use crate::format::format_percent;
use crate::system::snapshot::ProcessInfo;

pub const DEFAULT_UPTIME: &str = "0h 0m";
pub const DEFAULT_MAX_ROWS: usize = 50;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("{field} is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("process {pid} has a non-finite {field} value ({value})")]
    NonFiniteProcess {
        pid: u32,
        field: &'static str,
        value: f64,
    },
}

/// A finite percentage clamped into `[0, 100]`.
fn percent(field: &'static str, value: f64) -> Result<f64, DashboardError> {
    if !value.is_finite() {
        return Err(DashboardError::NonFinite { field, value });
    }
    Ok(value.clamp(0.0, 100.0))
}

/// Horizontal usage bar plus its text label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PercentBar {
    pub percent: f64,
    pub text: String,
}

impl PercentBar {
    pub fn set(&mut self, field: &'static str, value: f64) -> Result<(), DashboardError> {
        self.percent = percent(field, value)?;
        self.text = format_percent(value);
        Ok(())
    }

    pub fn ratio(&self) -> f64 {
        self.percent / 100.0
    }
}

/// Line chart on a fixed 0-100 y scale with a fixed number of x slots.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
    pub slots: usize,
    pub y_bounds: [f64; 2],
    pub redraws: u64,
}

impl LineChart {
    pub fn new(label: &'static str, slots: usize) -> Self {
        Self {
            label,
            points: Vec::with_capacity(slots),
            slots,
            y_bounds: [0.0, 100.0],
            redraws: 0,
        }
    }

    pub fn update(&mut self, points: Vec<(f64, f64)>) {
        self.points = points;
        self.redraws += 1;
    }
}

/// Two-segment radial gauge: `[value, 100 - value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Doughnut {
    pub label: &'static str,
    pub data: [f64; 2],
    pub cutout: f64,
}

impl Doughnut {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            data: [0.0, 100.0],
            cutout: 0.8,
        }
    }

    pub fn set(&mut self, field: &'static str, value: f64) -> Result<(), DashboardError> {
        let v = percent(field, value)?;
        self.data = [v, 100.0 - v];
        Ok(())
    }

    pub fn value(&self) -> f64 {
        self.data[0]
    }
}

/// One rendered table row; `pid` is what the row's kill control targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: u32,
    pub name: String,
    pub cpu: String,
    pub mem: String,
}

impl ProcessRow {
    fn from_process(p: &ProcessInfo) -> Result<Self, DashboardError> {
        for (field, value) in [("cpu", p.cpu), ("mem", p.mem)] {
            if !value.is_finite() {
                return Err(DashboardError::NonFiniteProcess {
                    pid: p.pid,
                    field,
                    value,
                });
            }
        }
        Ok(Self {
            pid: p.pid,
            name: p.name.clone(),
            cpu: format!("{:.2}", p.cpu),
            mem: format!("{:.2}", p.mem),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTable {
    rows: Vec<ProcessRow>,
    max_rows: usize,
}

impl ProcessTable {
    pub fn new(max_rows: usize) -> Self {
        Self {
            rows: Vec::new(),
            max_rows,
        }
    }

    /// Clears the table and renders up to `max_rows` entries in order.
    ///
    /// Rows are appended one at a time; if an entry is malformed the rows
    /// before it stay in place and the error is returned.
    pub fn rebuild(&mut self, processes: &[ProcessInfo]) -> Result<(), DashboardError> {
        self.rows.clear();
        for p in processes.iter().take(self.max_rows) {
            self.rows.push(ProcessRow::from_process(p)?);
        }
        Ok(())
    }

    pub fn rows(&self) -> &[ProcessRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pid_at(&self, index: usize) -> Option<u32> {
        self.rows.get(index).map(|r| r.pid)
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cpu_bar: PercentBar,
    pub mem_bar: PercentBar,
    pub uptime_text: String,
    pub cpu_chart: LineChart,
    pub cpu_gauge: Doughnut,
    pub mem_gauge: Doughnut,
    pub proc_table: ProcessTable,
}

impl DashboardView {
    pub fn new(history_slots: usize, max_rows: usize) -> Self {
        Self {
            cpu_bar: PercentBar {
                percent: 0.0,
                text: format_percent(0.0),
            },
            mem_bar: PercentBar {
                percent: 0.0,
                text: format_percent(0.0),
            },
            uptime_text: DEFAULT_UPTIME.to_string(),
            cpu_chart: LineChart::new("CPU %", history_slots),
            cpu_gauge: Doughnut::new("CPU"),
            mem_gauge: Doughnut::new("MEM"),
            proc_table: ProcessTable::new(max_rows),
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new(crate::system::history::DEFAULT_CAPACITY, DEFAULT_MAX_ROWS)
    }
}
