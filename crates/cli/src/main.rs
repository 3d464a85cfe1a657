fn main() {
    if let Err(e) = xrouter_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
