use std::process::ExitCode;

fn main() -> ExitCode {
    pydoc_scrape::cli::run()
}
