//! CLI command implementations.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use hackvm_common::MachineCode;
use hackvm_translator::{SourceUnit, TranslateConfig, Translator};
use log::debug;

const DEFAULT_MAX_CYCLES: u64 = 10_000_000;

/// Translate a .vm file, or every .vm file in a directory, to one .asm file.
pub fn translate(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: translate requires an input file or directory");
        eprintln!("Usage: hackvm translate <input.vm|dir> [-o output.asm] [--bootstrap|--no-bootstrap] [--entry NAME]");
        return Err(1);
    }

    let input = PathBuf::from(&args[0]);
    let mut output = None;
    let mut bootstrap = None;
    let mut config = TranslateConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => output = Some(PathBuf::from(flag_value(args, i, "-o")?)),
            "--entry" => config.entry = flag_value(args, i, "--entry")?.to_string(),
            "--bootstrap" => {
                bootstrap = Some(true);
                i += 1;
                continue;
            }
            "--no-bootstrap" => {
                bootstrap = Some(false);
                i += 1;
                continue;
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                return Err(1);
            }
        }
        i += 2;
    }

    let (files, default_output) = if input.is_dir() {
        let files = vm_files_in(&input)?;
        let name = dir_name(&input).ok_or_else(|| {
            eprintln!("error: cannot name output for '{}'", input.display());
            1
        })?;
        (files, input.join(format!("{name}.asm")))
    } else if input.extension().is_some_and(|ext| ext == "vm") {
        (vec![input.clone()], input.with_extension("asm"))
    } else {
        eprintln!(
            "error: '{}' is not a .vm file or a directory",
            input.display()
        );
        return Err(1);
    };
    config.bootstrap = bootstrap.unwrap_or(input.is_dir());
    let output = output.unwrap_or(default_output);

    let mut translator = Translator::new(&config).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    for path in &files {
        let unit = SourceUnit::from_path(path).map_err(|e| {
            eprintln!("error: cannot read '{}': {e}", path.display());
            1
        })?;
        translator.translate_unit(&unit).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
    }
    let commands = translator.command_count();
    let asm = translator.finish();

    let file = File::create(&output).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;
    asm.write_to(BufWriter::new(file)).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "translated {commands} commands ({} instructions) -> {}",
        asm.instruction_count(),
        output.display()
    );
    Ok(())
}

/// Assemble a .asm file to .hack text.
pub fn assemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: assemble requires an input file");
        eprintln!("Usage: hackvm assemble <input.asm> [-o output.hack]");
        return Err(1);
    }

    let input = Path::new(&args[0]);

    // Parse -o flag
    let output = if args.len() >= 3 && args[1] == "-o" {
        PathBuf::from(&args[2])
    } else {
        input.with_extension("hack")
    };

    let text = read_text(input)?;
    let code = hackvm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;

    fs::write(&output, code.to_text()).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!("assembled {} words -> {}", code.len(), output.display());
    Ok(())
}

/// Execute a .hack (or .asm) program and print a RAM range.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: hackvm run <input.hack|input.asm> [--max-cycles N] [--ram A..B]");
        return Err(1);
    }

    let input = Path::new(&args[0]);
    let mut max_cycles = DEFAULT_MAX_CYCLES;
    let mut range = (0u16, 16u16);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--max-cycles" => {
                let value = flag_value(args, i, "--max-cycles")?;
                max_cycles = value.parse().map_err(|_| {
                    eprintln!("error: invalid cycle count '{value}'");
                    1
                })?;
            }
            "--ram" => range = parse_range(flag_value(args, i, "--ram")?)?,
            other => {
                eprintln!("error: unexpected argument '{other}'");
                return Err(1);
            }
        }
        i += 2;
    }

    let code = load_program(input)?;
    let mut cpu = hackvm_cpu::Cpu::new(&code);
    let cycles = cpu.run(max_cycles).map_err(|e| {
        eprintln!("runtime error: {e}");
        3
    })?;

    for addr in range.0..range.1 {
        println!("RAM[{addr}] = {}", cpu.ram_signed(addr));
    }
    eprintln!("halted after {cycles} cycles");
    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, i32> {
    match args.get(i + 1) {
        Some(value) => Ok(value.as_str()),
        None => {
            eprintln!("error: {flag} requires a value");
            Err(1)
        }
    }
}

/// `A..B`, half-open.
fn parse_range(text: &str) -> Result<(u16, u16), i32> {
    let parsed = text
        .split_once("..")
        .and_then(|(a, b)| Some((a.parse::<u16>().ok()?, b.parse::<u16>().ok()?)));
    match parsed {
        Some((start, end)) if start <= end => Ok((start, end)),
        _ => {
            eprintln!("error: invalid RAM range '{text}' (expected A..B)");
            Err(1)
        }
    }
}

/// Every `.vm` file directly inside `dir`, sorted by file name.
fn vm_files_in(dir: &Path) -> Result<Vec<PathBuf>, i32> {
    let entries = fs::read_dir(dir).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", dir.display());
        1
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| {
                eprintln!("error: cannot read '{}': {e}", dir.display());
                1
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "vm") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        eprintln!("error: no .vm files in '{}'", dir.display());
        return Err(1);
    }
    debug!("found {} .vm files in {}", files.len(), dir.display());
    Ok(files)
}

fn dir_name(dir: &Path) -> Option<String> {
    let name = match dir.file_name() {
        Some(name) => name.to_os_string(),
        None => fs::canonicalize(dir).ok()?.file_name()?.to_os_string(),
    };
    name.into_string().ok()
}

fn read_text(path: &Path) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })
}

fn load_program(path: &Path) -> Result<MachineCode, i32> {
    let text = read_text(path)?;
    if path.extension().is_some_and(|ext| ext == "asm") {
        hackvm_assembler::assemble(&text).map_err(|e| {
            eprintln!("error: {e}");
            1
        })
    } else {
        MachineCode::from_text(&text).map_err(|e| {
            eprintln!("error: invalid machine code: {e}");
            1
        })
    }
}
