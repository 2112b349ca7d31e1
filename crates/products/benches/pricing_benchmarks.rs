use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use storefront_core::{ProductId, UserId};
use storefront_products::{Discount, DiscountId, Product, PurchasePricingService};

fn discounts(product_id: ProductId, count: usize) -> Vec<Discount> {
    (0..count)
        .map(|i| Discount {
            id: DiscountId(i as i64),
            name: format!("discount {i}"),
            product_id,
            amount: -1,
            // Half the discounts are gated above the benchmarked unit count.
            min_purchase_qty: if i % 2 == 0 { 1 } else { 100 },
        })
        .collect()
}

/// Benchmark: pricing a purchase as the discount list grows.
fn bench_prepare_purchase(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare_purchase");
    let svc = PurchasePricingService::new();

    for count in [0usize, 1, 10, 100, 1_000] {
        let product = Product::new(ProductId::new(), "colorful socks", UserId::new(), 1_000_000);
        let discounts = discounts(product.id_typed(), count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &discounts, |b, discounts| {
            b.iter(|| {
                svc.prepare_purchase(black_box(2), black_box(&product), black_box(discounts))
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark: product name validation.
fn bench_product_name_valid(c: &mut Criterion) {
    let name = storefront_products::ProductName::from("colorful socks in many sizes 42");
    c.bench_function("product_name_valid", |b| b.iter(|| black_box(&name).valid()));
}

criterion_group!(benches, bench_prepare_purchase, bench_product_name_valid);
criterion_main!(benches);
