use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kopia_console_core::table::{page_window, sort_indices, SortDirection, SortKey, TableState};

struct Row {
    path: String,
    size: Option<i64>,
}

fn make_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            // streut die Reihenfolge, damit nicht vorsortiert gemessen wird
            path: format!("/data/{:08}", (i * 7919) % n),
            size: if i % 13 == 0 { None } else { Some(((i * 104_729) % 1_000_003) as i64) },
        })
        .collect()
}

fn key(column: usize, row: &Row) -> SortKey {
    match column {
        0 => row.path.as_str().into(),
        _ => row.size.into(),
    }
}

fn benchmark_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_indices");
    for n in [100usize, 1_000, 10_000].iter() {
        let rows = make_rows(*n);
        group.bench_with_input(BenchmarkId::new("text", n), &rows, |b, rows| {
            b.iter(|| black_box(sort_indices(rows, |r| key(0, r), SortDirection::Ascending)))
        });
        group.bench_with_input(BenchmarkId::new("number_desc", n), &rows, |b, rows| {
            b.iter(|| black_box(sort_indices(rows, |r| key(1, r), SortDirection::Descending)))
        });
    }
    group.finish();
}

fn benchmark_visible_rows(c: &mut Criterion) {
    let rows = make_rows(10_000);
    let mut state = TableState::new(50);
    state.toggle_sort(1);
    state.go_to(42, rows.len());

    c.bench_function("visible_rows_sorted_10k", |b| b.iter(|| black_box(state.visible_rows(&rows, key).len())));

    let unsorted = TableState::new(100);
    c.bench_function("visible_rows_unsorted_10k", |b| {
        b.iter(|| black_box(unsorted.visible_rows(&rows, key).len()))
    });
}

fn benchmark_page_window(c: &mut Criterion) {
    c.bench_function("page_window", |b| {
        b.iter(|| {
            for current in 0..500 {
                black_box(page_window(black_box(current), 500, 20));
            }
        })
    });
}

criterion_group!(benches, benchmark_sort, benchmark_visible_rows, benchmark_page_window);
criterion_main!(benches);
