use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use bidlua_core::mapping::Direction;
use bidlua_core::names;
use bidlua_core::scanner::Substituter;
use bidlua_core::translit::{Transliterator, DEFAULT_DIRECTIVE};

const FUNCTION: &str = "\
локальный функция сумма(т)
  локальный итог = 0
  для _, з внутри ипары(т) делать
    если з ~= ничего тогда итог = итог + з конец
  конец
  вернуть итог -- \"конец\" в комментарии
конец
вывести(\"сумма: \" .. встроку(сумма({1, 2, 3})))
";

fn source(repeat: usize) -> String {
    FUNCTION.repeat(repeat)
}

static SIZES: &[(&str, usize)] = &[("short", 1), ("medium", 20), ("long", 400)];

fn bench_forward(c: &mut Criterion) {
    let sub = Substituter::new(names::builtin(), Direction::Forward);
    let mut group = c.benchmark_group("substitute/forward");
    for &(label, repeat) in SIZES {
        let text = source(repeat);
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, text| {
            b.iter(|| sub.substitute(text));
        });
    }
    group.finish();
}

fn bench_reverse(c: &mut Criterion) {
    let forward = Substituter::new(names::builtin(), Direction::Forward);
    let sub = Substituter::new(names::builtin(), Direction::Reverse);
    let mut group = c.benchmark_group("substitute/reverse");
    for &(label, repeat) in SIZES {
        let text = forward.substitute(&source(repeat));
        group.bench_with_input(BenchmarkId::new(label, text.len()), &text, |b, text| {
            b.iter(|| sub.substitute(text));
        });
    }
    group.finish();
}

fn bench_transliterate(c: &mut Criterion) {
    let t = Transliterator::new(DEFAULT_DIRECTIVE).unwrap();
    let text = "локальный translit(счётчик) = translit(Начало) + 1\n".repeat(100);
    c.bench_function("translit/100_lines", |b| b.iter(|| t.transliterate(&text)));
}

criterion_group!(benches, bench_forward, bench_reverse, bench_transliterate);
criterion_main!(benches);
