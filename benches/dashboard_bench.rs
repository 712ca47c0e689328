use std::future::Future;
use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use sysdash::app::{Dashboard, DashboardOptions};
use sysdash::bridge::MetricsBackend;
use sysdash::system::collector::sort_by_cpu_desc;
use sysdash::system::snapshot::{ProcessInfo, Snapshot};
use sysdash::ui;
use sysdash::ui::gauge::ring_points;
use tokio::sync::mpsc;

struct NullBridge;

impl MetricsBackend for NullBridge {
    fn fetch_snapshot(&self) -> impl Future<Output = Option<Snapshot>> + Send {
        async { None }
    }

    fn kill_process(&self, _pid: u32) {}
}

fn make_processes(n: usize) -> Vec<ProcessInfo> {
    (0..n)
        .map(|i| ProcessInfo {
            pid: i as u32 + 1,
            name: format!("proc_{i}"),
            cpu: ((i * 37) % 1000) as f64 / 10.0,
            mem: ((i * 13) % 500) as f64 / 10.0,
        })
        .collect()
}

fn make_snapshot(n: usize) -> Snapshot {
    Snapshot {
        cpu: Some(42.5),
        mem: Some(63.0),
        uptime: Some("12h 5m".to_string()),
        processes: make_processes(n),
    }
}

fn make_dashboard() -> Dashboard<NullBridge> {
    let (tx, _rx) = mpsc::unbounded_channel();
    Dashboard::new(Arc::new(NullBridge), tx, DashboardOptions::default())
}

fn bench_sort_by_cpu(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_by_cpu_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let processes = make_processes(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &processes,
            |b, processes| {
                b.iter(|| {
                    let mut sorted = black_box(processes.clone());
                    sort_by_cpu_desc(&mut sorted);
                    black_box(sorted);
                })
            },
        );
    }

    group.finish();
}

fn bench_apply_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_snapshot_50_200_1000");

    for size in [50usize, 200, 1000] {
        let snapshot = make_snapshot(size);
        let mut dash = make_dashboard();
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &snapshot,
            |b, snapshot| {
                b.iter(|| {
                    let outcome = dash.apply_snapshot(Some(black_box(snapshot.clone())));
                    black_box(outcome);
                })
            },
        );
    }

    group.finish();
}

fn bench_ring_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_points_rows_10_20_40");

    for rows in [10u16, 20, 40] {
        let dot = 2.0 / (rows as f64 * 4.0);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &dot, |b, dot| {
            b.iter(|| {
                let points = ring_points(black_box(0.62), 0.8, black_box(*dot));
                black_box(points);
            })
        });
    }

    group.finish();
}

fn bench_full_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_frame_160x50");
    let mut dash = make_dashboard();
    for _ in 0..25 {
        dash.apply_snapshot(Some(make_snapshot(200)));
    }

    group.bench_function("draw", |b| {
        b.iter(|| {
            let backend = TestBackend::new(160, 50);
            let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
            terminal
                .draw(|frame| ui::draw(frame, &mut dash))
                .expect("bench draw failed");
            black_box(terminal.backend());
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sort_by_cpu,
    bench_apply_snapshot,
    bench_ring_points,
    bench_full_frame
);
criterion_main!(benches);
