// This binary crate is intentionally minimal.
// All perceptron logic lives in the library (src/lib.rs and its modules).
// Run the demos with:
//   cargo run --example xor
//   cargo run --example digits --release
fn main() {
    println!("hematite-mlp: a from-scratch 3-layer perceptron in Rust.");
    println!("Run `cargo run --example xor` for the XOR demo,");
    println!("or `cargo run --example digits --release` for MNIST digits.");
}
