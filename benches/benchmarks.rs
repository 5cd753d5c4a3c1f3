//! Benchmarks for pagination and entitlement

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use letterhead_core::{
    compute_entitlement, paginate, split_paragraphs, AbnormalMonths, CharCountMeasurer,
    LayoutVariant, PageSetup, PaymentRecord,
};

fn letter(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| {
            format!(
                "Paragraph {} contains enough text to span multiple lines and test the line breaking algorithm.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_paginate_short(c: &mut Criterion) {
    let setup = PageSetup::default();
    let geometry = setup.geometry();
    let text = letter(8);

    c.bench_function("paginate_short_letter", |b| {
        b.iter(|| {
            let measurer = setup.measurer();
            black_box(paginate(
                split_paragraphs(black_box(&text)),
                &geometry,
                LayoutVariant::default(),
                &measurer,
            ))
        });
    });
}

fn bench_paginate_long(c: &mut Criterion) {
    let setup = PageSetup::default();
    let geometry = setup.geometry();
    let text = letter(300);

    c.bench_function("paginate_long_letter", |b| {
        b.iter(|| {
            let measurer = setup.measurer();
            black_box(paginate(
                split_paragraphs(black_box(&text)),
                &geometry,
                LayoutVariant { has_addressee_block: true },
                &measurer,
            ))
        });
    });
}

fn bench_paginate_warm_cache(c: &mut Criterion) {
    let setup = PageSetup::default();
    let geometry = setup.geometry();
    let measurer = setup.measurer();
    let text = letter(300);

    c.bench_function("paginate_long_letter_warm", |b| {
        b.iter(|| {
            black_box(paginate(
                split_paragraphs(black_box(&text)),
                &geometry,
                LayoutVariant::default(),
                &measurer,
            ))
        });
    });
}

fn bench_paginate_synthetic(c: &mut Criterion) {
    let geometry = PageSetup::default().geometry();
    let measurer = CharCountMeasurer::new(2.0, 170.0, 6.35);
    let text = letter(300);

    c.bench_function("paginate_char_count", |b| {
        b.iter(|| {
            black_box(paginate(
                split_paragraphs(black_box(&text)),
                &geometry,
                LayoutVariant::default(),
                &measurer,
            ))
        });
    });
}

fn bench_entitlement(c: &mut Criterion) {
    let payments: Vec<PaymentRecord> = (0..480u32)
        .flat_map(|i| {
            let year = 1990 + (i / 12) as i32;
            let month = (i % 12 + 1) as u8;
            [
                PaymentRecord::new(year, month, "Эрдэнэт үйлдвэр", true),
                PaymentRecord::new(year, month, "Сайн дурын даатгал", i % 7 == 0),
            ]
        })
        .collect();
    let declared: AbnormalMonths = (1990..2010).map(|y| (y, 12i64)).collect();

    c.bench_function("compute_entitlement_40_years", |b| {
        b.iter(|| black_box(compute_entitlement(black_box(&payments), &declared, 15)));
    });
}

criterion_group!(
    benches,
    bench_paginate_short,
    bench_paginate_long,
    bench_paginate_warm_cache,
    bench_paginate_synthetic,
    bench_entitlement,
);

criterion_main!(benches);
