use clap::Parser;
use fragkon::{cli, commands};
use log::LevelFilter;

fn main() {
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .init();

    let args = cli::Args::parse();

    if let Err(e) = commands::fragkon::run(args.input, args.outfile) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
