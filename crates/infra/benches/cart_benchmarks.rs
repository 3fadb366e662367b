use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use brocante_cart::{LineItemStatus, Variant};
use brocante_catalog::Product;
use brocante_core::{Identity, ProductId, Role, UserId};
use brocante_infra::cart::{AddItem, CartService};
use brocante_infra::store::{InMemoryStore, ProductStore, Store};

fn seeded() -> (Arc<InMemoryStore>, CartService, Identity, ProductId) {
    let store = Arc::new(InMemoryStore::new());
    let product = Product {
        id: ProductId::new(),
        seller_id: UserId::new(),
        title: "Bench lamp".to_string(),
        price: 1_000,
        stock: u32::MAX,
        colors: BTreeSet::new(),
        sizes: BTreeSet::new(),
        primary_image: None,
        created_at: Utc::now(),
    };
    store.upsert_product(product.clone()).unwrap();

    let facade: Arc<dyn Store> = store.clone();
    let cart = CartService::new(facade);
    let identity = Identity::new(UserId::new(), Role::Buyer);
    (store, cart, identity, product.id)
}

fn bench_cart_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_add");
    group.throughput(Throughput::Elements(1));

    group.bench_function("merge_into_existing_line", |b| {
        let (_store, cart, identity, product_id) = seeded();
        b.iter(|| {
            let line = cart
                .add(
                    &identity,
                    AddItem {
                        product_id,
                        variant: Variant::default(),
                        quantity: 1,
                        status: LineItemStatus::Cart,
                    },
                )
                .unwrap();
            black_box(line.quantity)
        });
    });

    group.bench_function("fresh_variant_line", |b| {
        let (_store, cart, identity, product_id) = seeded();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            let line = cart
                .add(
                    &identity,
                    AddItem {
                        product_id,
                        variant: Variant::new(Some(format!("shade-{n}")), None),
                        quantity: 1,
                        status: LineItemStatus::Cart,
                    },
                )
                .unwrap();
            black_box(line.id)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_cart_add);
criterion_main!(benches);
