use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gift_item::price::format_prices;
use gift_item::render::render_all;
use gift_item::{ListingAttributes, ListingField};

fn criterion_benchmark(c: &mut Criterion) {
    let attributes = ListingAttributes::new("42")
        .with(ListingField::Title, "Kettle")
        .with(ListingField::Description, "Stainless steel")
        .with(ListingField::Price, "1200")
        .with(ListingField::OriginalPrice, "1500");
    
    c.bench_function("format discounted prices", |b| b.iter(||
        format_prices(black_box(Some("1234567.89")), black_box(Some("2345678")))
    ));
    c.bench_function("format malformed prices", |b| b.iter(||
        format_prices(black_box(Some("twelve hundred")), black_box(None))
    ));
    c.bench_function("render listing", |b| b.iter(||
        render_all(black_box(&attributes))
    ));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
