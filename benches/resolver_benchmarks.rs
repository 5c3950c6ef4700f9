use criterion::{Criterion, black_box, criterion_group, criterion_main};

use keyguide::keyboard::guide::KeyGuide;
use keyguide::keyboard::registry::LayoutRegistry;
use keyguide::keyboard::resolver;
use keyguide::session::engine::TypingSession;

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog! Пельмені та борщ, Grüße @ café.";

fn bench_resolve_all_layouts(c: &mut Criterion) {
    let registry = LayoutRegistry::builtin();
    let layouts: Vec<_> = registry
        .list_all()
        .iter()
        .filter_map(|meta| registry.get(meta.id).ok())
        .collect();

    c.bench_function("resolve sample on every layout", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for layout in &layouts {
                for ch in SAMPLE.chars() {
                    if resolver::resolve(layout, black_box(ch)).is_some() {
                        found += 1;
                    }
                }
            }
            found
        })
    });
}

fn bench_guide_with_reference(c: &mut Criterion) {
    let registry = LayoutRegistry::builtin();
    let (Ok(us), Ok(uk)) = (registry.get("en-us"), registry.get("uk-ua")) else {
        return;
    };
    let chars: Vec<char> = SAMPLE.chars().collect();

    c.bench_function("key guide en-us with uk-ua reference", |b| {
        b.iter(|| {
            chars
                .windows(2)
                .filter_map(|w| KeyGuide::compute(black_box(w[1]), Some(w[0]), us, Some(uk)))
                .count()
        })
    });
}

fn bench_session_round(c: &mut Criterion) {
    c.bench_function("type a full round", |b| {
        b.iter(|| {
            let now = std::time::Instant::now();
            let mut session = TypingSession::new(SAMPLE, false);
            for ch in SAMPLE.chars() {
                session.type_char(black_box(ch), now);
            }
            session.drain_events().len()
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_all_layouts,
    bench_guide_with_reference,
    bench_session_round
);
criterion_main!(benches);
