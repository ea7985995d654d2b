use std::process::ExitCode;

fn main() -> ExitCode {
    rotulos_lib::run()
}
