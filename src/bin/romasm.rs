extern crate log;
extern crate simplelog;

use std::path::Path;
use std::process::exit;
use std::time::Instant;

use log::info;

use romasm::diagnostics::{ConsoleWriter, Listing, Writer};
use romasm::io::{read_program, write_listing_json, write_rom};
use romasm::*;

fn main() {
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        configure_logging(level).expect("Failed to configure logger.")
    }

    let target = match get_target(&config) {
        Ok(target) => target,
        Err(msg) => {
            print_errs(&[msg]);
            exit(ERR_CONFIG_ERROR)
        }
    };

    let input = config
        .value_of("input")
        .expect("Expected an input source file to lower");
    let src_path = Path::new(input);

    let read_time = Instant::now();
    let source = match read_program(src_path) {
        Ok(source) => source,
        Err(errs) => {
            print_errs(&errs);
            exit(ERR_READER_ERROR)
        }
    };
    info!("Reader: {}", read_time.elapsed().as_secs_f32());

    let lower_time = Instant::now();
    let lowered = match lower(&source, target.registers) {
        Ok(lowered) => lowered,
        Err(e) => {
            print_errs(&[e]);
            exit(ERR_LOWERING_ERROR)
        }
    };
    info!("Lowering: {}", lower_time.elapsed().as_secs_f32());

    for d in &lowered.diagnostics {
        eprintln!("[!] {}", d);
    }

    if config.is_present("listing") {
        println!("[+] New generated instructions:");
        let stdout = std::io::stdout();
        if let Err(e) = ConsoleWriter::new(stdout.lock()).write_listing(&Listing::new(&lowered)) {
            print_errs(&[e]);
            exit(ERR_IO_ERROR)
        }
    }

    if let Some(path) = config.value_of("listing-json") {
        if let Err(msg) = write_listing_json(Path::new(path), &lowered) {
            print_errs(&[msg]);
            exit(ERR_IO_ERROR)
        }
    }

    let image = RomImage::assemble(&lowered.program);
    for o in image.overflows() {
        eprintln!("[!] {}", o);
    }

    match config.value_of("output") {
        Some(path) => {
            if let Err(msg) = write_rom(Path::new(path), &image) {
                print_errs(&[msg]);
                exit(ERR_IO_ERROR)
            }
        }
        None => print!("{}", image.to_vhdl()),
    }

    if config.is_present("verify") {
        let original = match execute(&source, Flavor::Memory, &target) {
            Ok(run) => run,
            Err(fault) => {
                eprintln!("Source program faulted: {}", fault);
                exit(ERR_EXECUTION_FAULT)
            }
        };
        let lowered_run = match execute(lowered.program.instructions(), Flavor::Register, &target) {
            Ok(run) => run,
            Err(fault) => {
                eprintln!("Lowered program faulted: {}", fault);
                exit(ERR_VERIFY_MISMATCH)
            }
        };

        if let Halt::UnknownInstruction { ip, mnemonic } = &original.halt {
            eprintln!(
                "Source program halted on unknown instruction {} at {}; the lowered program skips it",
                mnemonic, ip
            );
        }

        let cells = original.differing_cells(&lowered_run);
        if !cells.is_empty() || original.output != lowered_run.output {
            for c in cells {
                eprintln!(
                    "mem[{}]: source {} lowered {}",
                    c, original.memory[c], lowered_run.memory[c]
                );
            }
            eprintln!("Lowered program diverges from the source program");
            exit(ERR_VERIFY_MISMATCH)
        }
        eprintln!("[+] Lowered program matches the source program");
    }
}
