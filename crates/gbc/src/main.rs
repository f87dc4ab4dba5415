//! GenesisBASIC Compiler - M68000 assembly generator for Sega Genesis
//!
//! Usage: gbc [OPTIONS] <input.gb>

use anyhow::Context;
use clap::Parser;
use gb_compiler::common::DiagnosticReporter;
use gb_compiler::driver;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "gbc")]
#[command(author = "GenesisBASIC Team")]
#[command(version = "0.1.0")]
#[command(about = "GenesisBASIC compiler for Sega Mega Drive/Genesis (M68000)", long_about = None)]
struct Args {
    /// Input source file (.gb)
    #[arg(required = true)]
    input: PathBuf,

    /// Output assembly file (default: input with .asm extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let output_path = args.output.clone().unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension("asm");
        path
    });

    if args.dump_tokens {
        eprintln!("=== Tokens ===");
        eprint!("{}", driver::dump_tokens(&source));
        eprintln!("=== End Tokens ===");
    }

    if args.verbose {
        eprintln!("Compiling {} -> {}", filename, output_path.display());
    }

    match driver::compile(&source) {
        Ok(asm) => {
            fs::write(&output_path, asm)
                .with_context(|| format!("cannot write {}", output_path.display()))?;
            println!("Successfully generated {}", output_path.display());
            print_rom_instructions(&output_path);
            Ok(())
        }
        Err(diagnostics) => {
            let mut reporter = DiagnosticReporter::new();
            let file_id = reporter.add_file(filename, source);
            reporter.report_all(file_id, &diagnostics);

            eprintln!("Compilation errors:");
            for diag in &diagnostics {
                eprintln!("{diag}");
            }
            anyhow::bail!("compilation failed with {} error(s)", diagnostics.len())
        }
    }
}

/// How to turn the emitted assembly into a runnable ROM.
fn print_rom_instructions(asm_file: &PathBuf) {
    println!();
    println!("=== Assemble to ROM with ClownAssembler ===");
    println!("1. Clone: git clone https://github.com/Clownacy/clownassembler.git");
    println!("2. Build: cd clownassembler && make assemblers");
    println!(
        "3. Run: ./clownassembler_asm68k -o demo.bin -l demo.lst {}",
        asm_file.display()
    );
    println!("4. Test in emulator (e.g., BlastEm, Gens/GS).");
}
