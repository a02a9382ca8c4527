//! Playback engine and layout benchmarks.
//!
//! The scroll tick runs at ~60 Hz and every relayout rewraps the whole script,
//! so both must stay well under a frame for long scripts.
//!
//! Run with: cargo bench --bench engine_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::{Duration, Instant};
use tprompt::engine::{Command, ControllerSettings, PlaybackController, Timeline};
use tprompt::layout::{LayoutProvider, TerminalLayout};
use tprompt::model::{LayoutMetrics, Script, Viewport};

/// A script of `words` words in paragraphs of sixty.
fn script(words: usize) -> Script {
    let text: Vec<String> = (0..words)
        .map(|i| {
            if i % 60 == 59 {
                format!("word{i}\n")
            } else {
                format!("word{i}")
            }
        })
        .collect();
    Script::new(text.join(" "))
}

fn metrics() -> LayoutMetrics {
    LayoutMetrics::new(Viewport::new(120, 40))
}

fn bench_wrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap");
    let layout = TerminalLayout::default();
    for words in [1_000, 10_000, 50_000] {
        let script = script(words);
        group.bench_with_input(BenchmarkId::new("wrap", words), &script, |b, script| {
            b.iter(|| layout.wrap(black_box(script), black_box(&metrics())))
        });
        group.bench_with_input(BenchmarkId::new("measure", words), &script, |b, script| {
            b.iter(|| layout.measure_extent(black_box(script), black_box(&metrics())))
        });
    }
    group.finish();
}

fn bench_advance(c: &mut Criterion) {
    let mut controller = PlaybackController::new(
        TerminalLayout::default(),
        script(50_000),
        metrics(),
        ControllerSettings {
            initial_speed: 0.001,
            countdown_seconds: 0,
            ..ControllerSettings::default()
        },
    )
    .unwrap_or_else(|err| panic!("layout failed: {err}"));
    let _ = controller.dispatch(Command::Start);

    c.bench_function("advance_one_frame", |b| {
        b.iter(|| controller.advance(black_box(Duration::from_millis(16))))
    });
}

fn bench_relayout(c: &mut Criterion) {
    c.bench_function("relayout_font_change", |b| {
        b.iter_batched(
            || {
                let controller = PlaybackController::new(
                    TerminalLayout::default(),
                    script(10_000),
                    metrics(),
                    ControllerSettings::default(),
                )
                .unwrap_or_else(|err| panic!("layout failed: {err}"));
                let mut timeline = Timeline::new(controller, Duration::from_millis(16));
                let _ = timeline.apply(Command::FitToDuration(300.0), Instant::now());
                timeline
            },
            |mut timeline| {
                let _ = timeline.apply(
                    Command::LayoutChanged(metrics().with_font_size(60)),
                    Instant::now(),
                );
                timeline
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_wrap, bench_advance, bench_relayout);
criterion_main!(benches);
