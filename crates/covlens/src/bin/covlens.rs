fn main() {
    if let Err(err) = covlens::run() {
        eprintln!("{}", covlens::format_error(&err));
        std::process::exit(1);
    }
}
