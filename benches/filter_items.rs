use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shopping_list::storage::{ItemStore, MemoryStore};
use shopping_list::{ListManager, ScriptedDialogs, UiEvent};

fn create_manager(items: usize) -> ListManager<MemoryStore, ScriptedDialogs> {
    let names = [
        "Whole Milk",
        "Sourdough Bread",
        "Free Range Eggs",
        "Greek Yoghurt",
        "Cheddar",
        "Bananas",
        "Granny Smith Apples",
        "Olive Oil",
    ];

    let mut manager = ListManager::new(ItemStore::new(MemoryStore::new()), ScriptedDialogs::default());
    for i in 0..items {
        let label = format!("{} #{}", names[i % names.len()], i);
        manager.dispatch(UiEvent::InputChanged(label)).unwrap();
        manager.dispatch(UiEvent::Submit).unwrap();
    }
    manager
}

fn bench_filter(c: &mut Criterion) {
    let mut manager = create_manager(1_000);

    c.bench_function("filter_1000_items", |b| {
        b.iter(|| {
            manager.apply_filter(black_box("apple"));
            manager.apply_filter(black_box(""));
        })
    });
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
