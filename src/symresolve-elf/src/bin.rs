/* SPDX-FileCopyrightText: © 2025-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use object::{Object, ObjectSymbol};
use symresolve::{CollectingDiagnostics, Diagnostics, GlobalSymbolTable, ObjectKind};

mod adapter;

/// symresolve-elf: exercise the symbol resolution core against real ELF inputs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Regular objects and shared libraries to resolve, in link order.
    inputs: Vec<PathBuf>,

    #[clap(long, short)]
    verbose: bool,
}

fn process_one(
    table: &mut GlobalSymbolTable,
    path: &PathBuf,
    verbose: bool,
) -> Result<(), String> {
    let data = fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    let file = object::File::parse(&*data).map_err(|e| format!("{}: {e}", path.display()))?;

    let object_name = path.display().to_string();
    let kind = if adapter::is_dynamic(&file) {
        ObjectKind::Shared
    } else {
        ObjectKind::Regular
    };
    let object_id = table.register_object(&object_name, kind);

    for sym in file.symbols() {
        if adapter::should_skip(&sym) {
            continue;
        }
        let Ok(name) = sym.name() else { continue };
        if name.is_empty() {
            continue;
        }

        let elf_sym = adapter::decode(&sym);
        let symbol_ref = table.insert_or_resolve(name, None, &elf_sym, object_id);

        if verbose {
            println!("{object_name}: {name} -> {symbol_ref:?}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let diagnostics: Box<dyn Diagnostics> = Box::new(CollectingDiagnostics::new());
    let mut table = GlobalSymbolTable::new(diagnostics, None);

    for input in &args.inputs {
        if let Err(e) = process_one(&mut table, input, args.verbose) {
            eprintln!("symresolve-elf: {e}");
            return ExitCode::FAILURE;
        }
    }

    let mut names: Vec<_> = table.iter().map(|(name, _)| name.to_owned()).collect();
    names.sort();
    names.dedup();

    for name in &names {
        if let Some(r) = table.lookup(name) {
            let record = table.get(r);
            println!(
                "{name}: binding={:?} type={:?} value=0x{:x} size={} in_reg={} in_dyn={}",
                record.binding, record.sym_type, record.value, record.symsize, record.in_reg, record.in_dyn
            );
        }
    }

    let has_errors = print_diagnostics(&table);
    if has_errors {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_diagnostics(table: &GlobalSymbolTable) -> bool {
    let Some(collecting) = table
        .diagnostics()
        .as_any()
        .downcast_ref::<CollectingDiagnostics>()
    else {
        return false;
    };

    for diag in collecting.diagnostics() {
        eprintln!("{diag}");
    }
    collecting.has_errors()
}
