fn main() {
    if let Err(err) = meeting_graph::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
