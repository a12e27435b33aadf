use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sheet_appender::constants::SCHEMA_WIDTH;
use sheet_appender::parser::{assemble_rows, parse_line};
use sheet_appender::validator::validate_rows;

fn payload(rows: usize) -> String {
    (0..rows)
        .map(|i| {
            format!(
                "type{},\"value, {}\",\"say \"\"hi\"\"\",3,4,5,6,7,{}",
                i % 4,
                i,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let line = r#"TypeA,"Value, 1","say ""hi""",3,4,5,6,7,8"#;
    c.bench_function("parse_line", |b| {
        b.iter(|| parse_line(black_box(line), ','))
    });

    let text = payload(10_000);
    c.bench_function("assemble_and_validate_10k", |b| {
        b.iter(|| validate_rows(assemble_rows(black_box(&text), ','), SCHEMA_WIDTH))
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
