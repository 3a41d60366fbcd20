// This binary crate is intentionally minimal.
// All logging logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example simulated_run
fn main() {
    println!("ferrite-log: text and time-series sinks for training statistics.");
    println!("Run `cargo run --example simulated_run` to see both sinks in action.");
}
