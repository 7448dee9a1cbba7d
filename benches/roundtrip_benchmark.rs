//! Benchmarks for retex parse/generate performance.
//!
//! Run with: cargo bench
//!
//! Synthetic documents are generated with a configurable page count so
//! the scaling of whole-document conversion is visible.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use retex::Converter;

/// Build a synthetic document source with the given number of pages.
fn create_test_document(page_count: usize) -> String {
    let mut source = String::new();

    source.push_str("\\renewcommand{\\myname}{\\textbf{Bench Mark}}\n");
    source.push_str("\\renewcommand{\\mydate}{July 2025}\n");
    source.push_str("\\renewcommand{\\brand}{Synthetic Benchmark Engineer}\n");
    source.push_str("\\renewcommand{\\emphcolor}{NavyBlue}\n\n");
    source.push_str("\\begin{document}\n\n\\begin{paracol}{2}\n\n");

    for page in 0..page_count {
        if page == 0 {
            source.push_str("\\section*{Core Skills}\n\n");
            source.push_str(
                "{ \\setlength{\\baselineskip}{10pt} \\setlength{\\parskip}{7.5pt} \\scshape\n\n    Benchmarking\n\n    Profiling\n\n}\n\n",
            );
            source.push_str("\\switchcolumn\n\n");
        }

        source.push_str(&format!("\\section*{{Experience {page}}}\n\n"));
        for entry in 0..4 {
            source.push_str(&format!(
                "\\begin{{itemizeAcademic}}{{Company {page}-{entry}}}{{Engineer}}{{Remote}}{{2020 -- 2022}}\n\n"
            ));
            for bullet in 0..6 {
                source.push_str(&format!(
                    "    \\itemi Delivered \\textbf{{milestone {bullet}}} on schedule\n\n"
                ));
            }
            source.push_str("\\end{itemizeAcademic}\n\n");
        }

        if page + 1 < page_count {
            source.push_str("\\clearpage\n\n");
        }
    }

    source.push_str("\\end{paracol}\n\n\\end{document}\n");
    source
}

fn bench_parse(c: &mut Criterion) {
    let converter = Converter::new();
    for pages in [1, 2, 4] {
        let source = create_test_document(pages);
        c.bench_function(&format!("parse_{pages}_pages"), |b| {
            b.iter(|| converter.parse(black_box(&source)).unwrap())
        });
    }
}

fn bench_generate(c: &mut Criterion) {
    let converter = Converter::new();
    let doc = converter.parse(&create_test_document(2)).unwrap();
    c.bench_function("generate_2_pages", |b| {
        b.iter(|| converter.generate(black_box(&doc)).unwrap())
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let converter = Converter::new();
    let source = create_test_document(2);
    c.bench_function("roundtrip_2_pages", |b| {
        b.iter(|| {
            let doc = converter.parse(black_box(&source)).unwrap();
            converter.generate(&doc).unwrap()
        })
    });
}

criterion_group!(benches, bench_parse, bench_generate, bench_roundtrip);
criterion_main!(benches);
