fn main() {
    std::process::exit(tasklist::cli::run_cli());
}
