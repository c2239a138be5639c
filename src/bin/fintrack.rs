use fintrack_core::cli::commands;

fn main() {
    fintrack_core::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(commands::run(&args));
}
