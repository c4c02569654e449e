fn main() {
    if let Err(err) = fastbuster::run() {
        // The terminal guard has already restored the screen by the time we get here.
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
