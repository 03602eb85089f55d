/// MNIST digit classification demo.
///
/// Architecture: 784 -> 128 (Sigmoid) -> 10 (Sigmoid), fully online
/// updates (one weight update per image), learning rate 0.1.
///
/// Run with:
///   cargo run --example digits --release
///
/// The four IDX files must be present under data/ (see the constants
/// below). A per-epoch training report is written to digits_report.json.
use std::fs::File;
use std::io::BufWriter;
use std::process;

use hematite_mlp::{
    argmax, evaluate, load_images, load_labels, train_loop, EpochStats, Perceptron, TrainConfig,
};

const TRAIN_IMAGES: &str = "data/train-images-idx3-ubyte";
const TRAIN_LABELS: &str = "data/train-labels-idx1-ubyte";
const TEST_IMAGES: &str = "data/t10k-images-idx3-ubyte";
const TEST_LABELS: &str = "data/t10k-labels-idx1-ubyte";
const REPORT_PATH: &str = "digits_report.json";

const N_CLASSES: usize = 10;
const EPOCHS: usize = 3;

/// Prints a 28x28 image as an ASCII grid, one '@' per bright pixel.
fn print_digit(pixels: &[f64], label: usize) {
    println!("\n--- DIGIT (label: {label}) ---");
    for row in pixels.chunks(28) {
        let line: String = row
            .iter()
            .map(|&px| if px > 0.5 { " @" } else { " ." })
            .collect();
        println!("{line}");
    }
}

fn load_dataset(
    images_path: &str,
    labels_path: &str,
) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let images = load_images(images_path).unwrap_or_else(|e| {
        eprintln!("Cannot load '{images_path}': {e}");
        process::exit(1);
    });
    let labels = load_labels(labels_path, N_CLASSES).unwrap_or_else(|e| {
        eprintln!("Cannot load '{labels_path}': {e}");
        process::exit(1);
    });
    (images, labels)
}

fn main() {
    println!("DIGIT RECOGNIZER");

    println!("\nLoading MNIST data...");
    let (train_images, train_labels) = load_dataset(TRAIN_IMAGES, TRAIN_LABELS);
    let (test_images, test_labels) = load_dataset(TEST_IMAGES, TEST_LABELS);
    if train_images.is_empty() || test_images.is_empty() {
        eprintln!("Dataset files parsed but contain no images. Exiting.");
        process::exit(1);
    }
    println!("  Training set: {} images", train_images.len());
    println!("  Test set:     {} images", test_images.len());

    let input_size = train_images[0].len();
    let mut nn = Perceptron::new(input_size, 128, N_CLASSES);
    println!("\nTopology: {input_size} -> 128 -> {N_CLASSES}, lr = {}", nn.learning_rate());

    println!("\nTraining for {EPOCHS} epochs (online updates)...");
    println!("{:>6}  {:>12}  {:>10}", "Epoch", "MSE Loss", "Time (s)");

    let config = TrainConfig::new(1);
    let mut rng = rand::thread_rng();
    let mut history: Vec<EpochStats> = Vec::new();

    for epoch in 1..=EPOCHS {
        let mut stats = train_loop(&mut nn, &train_images, &train_labels, &config, &mut rng)
            .expect("dataset vectors match the network topology")
            .remove(0);
        // train_loop numbered its single pass 1/1; renumber into this run.
        stats.epoch = epoch;
        stats.total_epochs = EPOCHS;

        println!(
            "{:>6}  {:>12.6}  {:>10.1}",
            stats.epoch,
            stats.train_loss,
            stats.elapsed_ms as f64 / 1000.0
        );
        history.push(stats);
    }

    println!("\nEvaluating on the test set ({} images)...", test_images.len());
    let accuracy = evaluate(&nn, &test_images, &test_labels)
        .expect("dataset vectors match the network topology");
    println!("  Test accuracy: {:.2}%", accuracy * 100.0);

    // Visual spot check on the first few test digits.
    for (image, label) in test_images.iter().zip(test_labels.iter()).take(3) {
        let truth = argmax(label);
        print_digit(image, truth);
        let output = nn.infer(image).expect("image has the configured shape");
        println!("Prediction: {}", argmax(&output));
    }

    let report = File::create(REPORT_PATH).unwrap_or_else(|e| {
        eprintln!("Cannot create '{REPORT_PATH}': {e}");
        process::exit(1);
    });
    serde_json::to_writer_pretty(BufWriter::new(report), &history)
        .expect("epoch stats serialize to JSON");
    println!("\nTraining report written to {REPORT_PATH}");
}
