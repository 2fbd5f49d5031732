use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitfolio::model::{Commit, FileStatus};
use gitfolio::{aggregate, extract_content};

fn sample_commits(n: usize) -> Vec<Commit> {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let ts = now - Duration::hours((i * 7) as i64);
            Commit::new(format!("{i:040x}"), "Ada", format!("commit {i}"), ts)
        })
        .collect()
}

fn sample_patch(lines: usize) -> String {
    let mut patch = String::from("diff --git a/README.md b/README.md\n@@ -1,1 +1,400 @@\n");
    for i in 0..lines {
        match i % 5 {
            0 => patch.push_str("+```rust\n"),
            1 => patch.push_str(&format!("+let x{i} = {i};\n")),
            2 => patch.push_str("+```\n"),
            3 => patch.push_str(&format!("-removed {i}\n")),
            _ => patch.push_str(&format!(" context {i}\n")),
        }
    }
    patch
}

fn bench_aggregate(c: &mut Criterion) {
    let commits = sample_commits(100);
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    c.bench_function("aggregate 100 commits / 365 days", |b| {
        b.iter(|| aggregate(black_box(&commits), 365, now))
    });
}

fn bench_extract(c: &mut Criterion) {
    let patch = sample_patch(400);
    c.bench_function("extract_content 400 lines", |b| {
        b.iter(|| extract_content(black_box(&patch), FileStatus::Modified))
    });
}

criterion_group!(benches, bench_aggregate, bench_extract);
criterion_main!(benches);
