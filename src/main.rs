use std::process::ExitCode;

fn main() -> ExitCode {
    hidrica::run()
}
