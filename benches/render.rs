// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;

use criterion::Criterion;
use mandelscope::{render_single, Dispatcher, DisplayPass, FractalParams};

fn params() -> FractalParams {
    FractalParams::new(-2.0, 1.0, -1.5, 1.5, 180).unwrap()
}

fn render_benchmark(c: &mut Criterion) {
    c.bench_function("render single 128x128", |b| {
        b.iter(|| render_single(&params(), 128, 128).unwrap())
    });
    c.bench_function("render tiled 128x128", |b| {
        let dispatcher = Dispatcher::default();
        b.iter(|| dispatcher.render(&params(), 128, 128).unwrap())
    });
    c.bench_function("present 128x128 to 256x256", |b| {
        let image = Dispatcher::default().render(&params(), 128, 128).unwrap();
        let display = DisplayPass::default();
        b.iter(|| display.present(&image, 256, 256).unwrap())
    });
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
