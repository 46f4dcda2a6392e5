use std::path::PathBuf;

mod keymap;
mod run;
mod sound;

fn main() {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(rom) => {
            if let Err(e) = run::run(rom) {
                eprintln!("chisel8: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            eprintln!("usage: chisel8 <rom>");
            std::process::exit(2);
        }
    }
}
