fn main() {
    if let Err(err) = mealnote_lib::run() {
        log::error!("{err:#}");
        eprintln!("mealnote: {err:#}");
        std::process::exit(1);
    }
}
