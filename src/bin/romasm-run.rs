extern crate log;
extern crate simplelog;

use std::path::Path;
use std::process::exit;

use romasm::io::read_program;
use romasm::*;

fn main() {
    let config = configure_run_cli().get_matches();

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
        .expect("Expected an input source file to run");

    let source = match read_program(Path::new(input)) {
        Ok(source) => source,
        Err(errs) => {
            print_errs(&errs);
            exit(ERR_READER_ERROR)
        }
    };

    let result = if config.is_present("lower") {
        let lowered = match lower(&source, target.registers) {
            Ok(lowered) => lowered,
            Err(e) => {
                print_errs(&[e]);
                exit(ERR_LOWERING_ERROR)
            }
        };
        for d in &lowered.diagnostics {
            eprintln!("[!] {}", d);
        }
        execute(lowered.program.instructions(), Flavor::Register, &target)
    } else {
        execute(&source, Flavor::Memory, &target)
    };

    match result {
        Ok(run) => {
            for v in &run.output {
                println!("{}", v);
            }
            if let Halt::UnknownInstruction { mnemonic, .. } = &run.halt {
                println!("Unknown instruction: {}", mnemonic);
            }
            println!("Memory at the end:");
            println!("{:?}", run.memory);
        }
        Err(fault) => {
            eprintln!("{}", fault);
            exit(ERR_EXECUTION_FAULT)
        }
    }
}
