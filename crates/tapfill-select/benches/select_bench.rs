// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bench: one full show → select cycle, at typical and pathological
// credential counts.

use criterion::{Criterion, criterion_group, criterion_main};

use tapfill_core::Credential;
use tapfill_select::{SelectionDelegate, SelectionMediator};

struct NullDelegate;

impl SelectionDelegate for NullDelegate {
    fn on_dismissed(&mut self) {}
}

fn credentials(count: usize) -> Vec<Credential> {
    (0..count)
        .map(|i| Credential::new(format!("user{i}"), "********", None, false))
        .collect()
}

fn bench_show_and_select(c: &mut Criterion) {
    for count in [3usize, 100] {
        c.bench_function(&format!("show_select_{count}"), |b| {
            let mut mediator = SelectionMediator::new(Box::new(NullDelegate));
            let creds = credentials(count);
            b.iter(|| {
                mediator
                    .show_credentials("www.example.xyz", creds.clone(), |cred| {
                        std::hint::black_box(cred);
                    })
                    .unwrap();
                mediator.select_at(count - 1).unwrap();
            });
        });
    }
}

criterion_group!(benches, bench_show_and_select);
criterion_main!(benches);
