use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use jcst::{
    config::LanguageLevel,
    copy::change::insert_copy,
    java::{chameleon::CodeBlockParser, parser::parse_file},
    semantic::{ClassIndex, DefaultServices},
    tree::LazyParser,
    JavaLanguage, NodeId, Tree,
};

fn source_file(methods: usize) -> String {
    let mut text = String::from("package bench;\n\nimport java.util.List;\nimport java.util.Map;\n\nclass Bench {\n");
    for i in 0..methods {
        text.push_str(&format!(
            "    int m{i}(List<String> items, Map<String, Integer> counts) {{\n        int total = 0;\n        for \
             (String item : items) {{\n            if (counts.get(item) != null) {{ total += counts.get(item); }}\n        \
             }}\n        return total * {i};\n    }}\n",
        ));
    }
    text.push_str("}\n");
    text
}

fn parse_deep(tree: &mut Tree, text: &str) -> NodeId {
    let file = parse_file(tree, text, LanguageLevel::HIGHEST).unwrap();
    tree.ensure_parsed_deep(file).unwrap();
    file
}

pub fn parse(c: &mut Criterion) {
    let text = source_file(50);
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("file, lazy bodies", |b| {
        b.iter_batched(
            || Tree::new(JavaLanguage::shared()),
            |mut tree| parse_file(&mut tree, &text, LanguageLevel::HIGHEST).unwrap(),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("file, all bodies", |b| {
        b.iter_batched(
            || Tree::new(JavaLanguage::shared()),
            |mut tree| parse_deep(&mut tree, &text),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("count errors", |b| {
        let body = "{ int total = 0; for (String item : items) { if (a) { total++; } } return total; }";
        b.iter(|| CodeBlockParser.count_errors(body, LanguageLevel::HIGHEST))
    });

    group.finish();
}

pub fn copy(c: &mut Criterion) {
    let text = source_file(10);
    let mut group = c.benchmark_group("copy");
    group.throughput(Throughput::Elements(1));

    group.bench_function("class into a file without imports", |b| {
        b.iter_batched(
            || {
                let mut tree = Tree::new(JavaLanguage::shared());
                let source = parse_deep(&mut tree, &text);
                let target = parse_deep(&mut tree, "package other;\n\nclass Target { }");
                let mut index = ClassIndex::with_jdk_defaults();
                index.index_file(&tree, source);
                index.index_file(&tree, target);
                let class = tree.language().types().class;
                let method = tree.language().types().method;
                let copied = tree.descendants(source).find(|&node| tree.kind(node) == method).unwrap();
                let parent = tree.descendants(target).find(|&node| tree.kind(node) == class).unwrap();
                (tree, DefaultServices::new(index, Default::default()), parent, copied)
            },
            |(mut tree, services, parent, copied)| {
                insert_copy(&mut tree, services.services(), parent, None, copied).unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, parse, copy);
criterion_main!(benches);
