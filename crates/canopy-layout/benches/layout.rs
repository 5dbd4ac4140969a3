//! Benchmarks for treemap tiling.

use canopy_core::Size;
use canopy_layout::{Hierarchy, HierarchyData, Treemap, WrapGrid};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

struct BenchNode {
    name: String,
    value: f64,
    children: Vec<BenchNode>,
}

impl HierarchyData for BenchNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn own_value(&self) -> f64 {
        self.value
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// 100 leaves spread over 10 categories, like the published datasets.
fn hundred_leaves() -> BenchNode {
    let categories = (0..10)
        .map(|c| BenchNode {
            name: format!("category-{c}"),
            value: 0.0,
            children: (0..10)
                .map(|i| BenchNode {
                    name: format!("item-{c}-{i}"),
                    value: f64::from((c * 10 + i) as u32 + 1) * 1.7,
                    children: Vec::new(),
                })
                .collect(),
        })
        .collect();
    BenchNode {
        name: "root".to_string(),
        value: 0.0,
        children: categories,
    }
}

fn bench_treemap(c: &mut Criterion) {
    let root = hundred_leaves();
    let treemap = Treemap::new(Size::new(1150.0, 750.0))
        .with_padding(1.0)
        .with_round(true);

    c.bench_function("treemap_100_leaves", |b| {
        b.iter(|| {
            let mut hierarchy = Hierarchy::new(black_box(&root));
            treemap.layout(&mut hierarchy);
            black_box(hierarchy.leaves().count())
        });
    });

    c.bench_function("wrap_grid_origins", |b| {
        let grid = WrapGrid::fit(500.0, 150.0, 15.0, 10.0);
        b.iter(|| {
            (0..100)
                .map(|i| grid.cell_origin(black_box(i)).y)
                .sum::<f32>()
        });
    });
}

criterion_group!(benches, bench_treemap);
criterion_main!(benches);
