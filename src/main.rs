fn main() {
    if let Err(error) = image_session::run_cli() {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
