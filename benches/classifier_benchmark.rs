use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lettermix::{extract, Classifier, Dataset, LabelMap, LinearClassifier, Trainer};
use std::io::Cursor;

const TRAINING_RECORDS: &str = "\
en,The weather is worth watching this weekend
en,With the thirty three thieves in the night
en,Where the wild things are
fr,Le jour de la nouvelle lune
fr,La douce musique du soir
fr,Une jolie rue de quartier
de,Zwei kleine Katzen schlafen
de,Schnelle Zuege fahren weit
de,Kurze Zeit im dunklen Wald
";

fn training_set() -> (Dataset, LabelMap) {
    Dataset::training_from_reader(Cursor::new(TRAINING_RECORDS)).unwrap()
}

fn setup_benchmark_classifier() -> Classifier {
    let (trainset, labels) = training_set();
    let mut model = LinearClassifier::builder().with_labels(&labels).build().unwrap();
    Trainer::new(0.91, 200).unwrap().train(&mut model, &trainset, &labels);
    Classifier::new(model, labels).unwrap()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Extraction");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| extract(black_box("This is a short title"))));

    group.bench_function("long_text", |b| {
        b.iter(|| {
            extract(black_box(
                "This is a much longer title that keeps going well past what a usual \
                 headline would contain, with punctuation, digits like 2024, and a few \
                 words en français pour faire bonne mesure.",
            ))
        })
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let (trainset, labels) = training_set();
    let mut group = c.benchmark_group("Training");
    group.sample_size(50);

    group.bench_function("single_epoch", |b| {
        let mut model = LinearClassifier::builder().with_labels(&labels).build().unwrap();
        b.iter(|| model.update(black_box(0.91), &trainset, &labels))
    });

    group.bench_function("cost", |b| {
        let model = LinearClassifier::builder().with_labels(&labels).build().unwrap();
        b.iter(|| model.cost(black_box(&trainset), &labels))
    });

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let classifier = setup_benchmark_classifier();
    let mut group = c.benchmark_group("Prediction");
    group.sample_size(50);

    group.bench_function("classify_text", |b| {
        b.iter(|| classifier.classify_text(black_box("Der schnelle Zug")))
    });

    let features = extract("la lune douce");
    group.bench_function("classify_features", |b| b.iter(|| classifier.classify(black_box(&features))));

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_training, bench_prediction);
criterion_main!(benches);
