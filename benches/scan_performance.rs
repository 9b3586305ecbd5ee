use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use linetally::config::Config;
use linetally::scan;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fixture generator for source directories
mod fixtures {
    use super::*;

    /// `files` C sources of `lines` lines each, every fourth line blank
    pub fn create_sources(base: &Path, files: usize, lines: usize) -> std::io::Result<()> {
        for i in 0..files {
            let mut text = String::new();
            for l in 0..lines {
                if l % 4 == 3 {
                    text.push('\n');
                } else {
                    text.push_str(&format!("int v{l} = {i};\n"));
                }
            }
            fs::write(base.join(format!("unit_{i}.c")), text)?;
        }

        // files outside the allow-list must not cost anything but a stat
        fs::write(base.join("README.md"), "# fixture\n")?;
        fs::write(base.join("data.bin"), vec![0u8; 4096])?;
        Ok(())
    }

    /// Same sources spread over `dirs` subdirectories
    pub fn create_tree(
        base: &Path,
        dirs: usize,
        files: usize,
        lines: usize,
    ) -> std::io::Result<()> {
        for d in 0..dirs {
            let sub = base.join(format!("mod_{d}"));
            fs::create_dir_all(&sub)?;
            create_sources(&sub, files, lines)?;
        }
        Ok(())
    }
}

fn bench_flat_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_scan");

    for &files in &[10usize, 100, 500] {
        let temp = TempDir::new().unwrap();
        fixtures::create_sources(temp.path(), files, 200).unwrap();
        let config = Config::for_root(temp.path().to_path_buf());

        group.bench_with_input(BenchmarkId::from_parameter(files), &config, |b, config| {
            b.iter(|| black_box(scan::run(config)));
        });
    }

    group.finish();
}

fn bench_recursive_scan(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    fixtures::create_tree(temp.path(), 20, 25, 200).unwrap();

    let mut config = Config::for_root(temp.path().to_path_buf());
    config.recursive = true;

    c.bench_function("recursive_scan_20x25", |b| {
        b.iter(|| black_box(scan::run(&config)));
    });
}

fn bench_line_counting(c: &mut Criterion) {
    let text: String = (0..10_000)
        .map(|i| if i % 5 == 0 { "\n".to_string() } else { format!("line {i}\n") })
        .collect();

    c.bench_function("count_bytes_10k_lines", |b| {
        b.iter(|| black_box(scan::counter::count_bytes(black_box(text.as_bytes()))));
    });
}

criterion_group!(benches, bench_flat_scan, bench_recursive_scan, bench_line_counting);
criterion_main!(benches);
