use property_core::cli;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}
