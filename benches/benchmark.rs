use std::hint::black_box;
use std::sync::Arc;

use bolton::{Args, Implementation, Registry, Value};
use criterion::{Criterion, criterion_group, criterion_main};

bolton::capability! {
    pub Weigh(dispatch = WeighDispatch, instance = WeighMethods) {
        fn weight() -> u64;
    }
}

struct Parcel {
    grams: u64,
}

// registers `guarded` implementations that never match before the one that does,
// so the scan length is the thing being measured
fn registry_with(guarded: usize) -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    for i in 0..guarded {
        registry
            .implement::<Weigh>()
            .for_type::<Parcel>()
            .when(move |p: &Parcel| p.grams == i as u64 + 1_000_000)
            .with(Implementation::new(format!("guarded-{}", i)).method("weight", |p: &Parcel, _: Args| {
                Ok(Value::new(p.grams))
            }))
            .unwrap();
    }
    registry
        .implement::<Weigh>()
        .for_type::<Parcel>()
        .with(Implementation::new("fallback").method("weight", |p: &Parcel, _: Args| {
            Ok(Value::new(p.grams / 1000))
        }))
        .unwrap();
    registry
}

fn dispatch_benchmark(c: &mut Criterion) {
    let parcel = Parcel { grams: 2500 };
    for guarded in [0, 8, 64] {
        let registry = registry_with(guarded);
        let dispatcher = registry.dispatcher::<Weigh>();
        c.bench_function(&format!("dispatcher, {} guarded ahead", guarded), |b| {
            b.iter(|| dispatcher.weight(black_box(&parcel)).unwrap())
        });
        c.bench_function(&format!("instance, {} guarded ahead", guarded), |b| {
            b.iter(|| registry.on(black_box(&parcel)).weight().unwrap())
        });
    }
}

criterion_group!(benches, dispatch_benchmark);
criterion_main!(benches);
