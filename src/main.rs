fn main() {
    if let Err(err) = canvas_forge::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
