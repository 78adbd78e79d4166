//! Hack VM CLI — translate, assemble, and run.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/translation/assembly error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "translate" => commands::translate(&args[2..]),
        "assemble" => commands::assemble(&args[2..]),
        "run" => commands::run(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: hackvm <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  translate <input.vm|dir> [-o output.asm] [--bootstrap|--no-bootstrap] [--entry NAME]");
    eprintln!("                                          Translate VM code to assembly");
    eprintln!("  assemble <input.asm> [-o output.hack]   Assemble to machine code text");
    eprintln!("  run <input.hack|input.asm> [--max-cycles N] [--ram A..B]");
    eprintln!("                                          Execute on the CPU emulator");
}
