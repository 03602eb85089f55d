use std::io::{self, Write};

use hematite_mlp::Perceptron;
use rand::Rng;

/// Inline progress bar, redrawn in place with a carriage return.
fn print_progress_bar(current: usize, total: usize) {
    let progress = current as f64 / total as f64;
    let bar_width = 50usize;
    let pos = (bar_width as f64 * progress) as usize;

    let mut bar = String::with_capacity(bar_width);
    for i in 0..bar_width {
        bar.push(if i < pos {
            '='
        } else if i == pos {
            '>'
        } else {
            ' '
        });
    }

    print!("[{}] {} %\r", bar, (progress * 100.0) as usize);
    io::stdout().flush().unwrap();
}

fn main() {
    println!("   NEURAL NETWORK: NON-LINEAR LOGIC GATE (XOR)   ");

    // 2 inputs -> 4 hidden -> 1 output
    let mut nn = Perceptron::new(2, 4, 1);
    println!("[SYSTEM] Architecture: 2-4-1 perceptron");
    println!("[SYSTEM] Learning rate: {}", nn.learning_rate());
    println!("[SYSTEM] Activation: Sigmoid");

    let inputs = [
        [0.0, 0.0],
        [0.0, 1.0],
        [1.0, 0.0],
        [1.0, 1.0],
    ];
    let targets = [[0.0], [1.0], [1.0], [0.0]];

    let epochs = 50_000;
    println!("\n[PROCESS] Training model ({epochs} online steps)...");

    let mut rng = rand::thread_rng();
    for i in 0..epochs {
        let index = rng.gen_range(0..4);
        nn.train(&inputs[index], &targets[index])
            .expect("training sample has the configured shape");

        if i % 500 == 0 {
            print_progress_bar(i, epochs);
        }
    }
    print_progress_bar(epochs, epochs);
    println!("\n\n[SUCCESS] Model trained.\n");

    println!(" INPUT A | INPUT B | TARGET | PREDICTION | STATUS ");

    for (input, target) in inputs.iter().zip(targets.iter()) {
        let guess = nn.infer(input).expect("input has the configured shape")[0];
        let rounded = if guess > 0.5 { 1.0 } else { 0.0 };
        let status = if rounded == target[0] { "PASS" } else { "FAIL" };

        println!(
            "    {}    |    {}    |   {}    |   {:.4}   |  {}",
            input[0] as u8, input[1] as u8, target[0] as u8, guess, status
        );
    }
    println!("===================================================");
}
