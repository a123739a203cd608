/* SPDX-FileCopyrightText: © 2025-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! Decodes `object`-crate symbol views into the [`symresolve::ElfSym`] the
//! core consumes, working off the crate's architecture-agnostic
//! `Object`/`ObjectSymbol` traits instead of a fixed 32-bit `ElfFile32`.

use object::{Object, ObjectSymbol, SymbolFlags, SymbolSection};
use symresolve::{Binding, ElfSym, SectionIndex, SymType, Visibility};

/// A symbol this tool declines to feed into the table: local symbols never
/// belong in the global symbol table, and section/file symbols carry no
/// linkable name.
pub fn should_skip(sym: &object::Symbol<'_, '_>) -> bool {
    if sym.is_local() {
        return true;
    }
    matches!(
        sym.kind(),
        object::SymbolKind::Section | object::SymbolKind::File | object::SymbolKind::Null
    )
}

/// Decodes one `object` symbol view into the fixed-shape value the
/// resolution core operates on.
///
/// Panics if the object was not actually ELF (`flags()` would then not be
/// the `Elf` variant) -- this adapter is only ever driven from an ELF input.
pub fn decode(sym: &object::Symbol<'_, '_>) -> ElfSym {
    let (st_info, st_other) = match sym.flags() {
        SymbolFlags::Elf { st_info, st_other } => (st_info, st_other),
        _ => panic!("symresolve-elf: non-ELF symbol reached the ELF adapter"),
    };

    let binding = Binding::from_raw(st_info >> 4);
    let sym_type = SymType::from_raw(st_info & 0xf);
    let visibility = Visibility::from_raw(st_other);
    let nonvis = st_other >> 2;

    let section = match sym.section() {
        SymbolSection::Undefined => SectionIndex::Undef,
        SymbolSection::Common => SectionIndex::Common,
        SymbolSection::Section(idx) => SectionIndex::Normal(idx.0 as u32),
        _ => SectionIndex::Normal(0),
    };

    ElfSym {
        binding,
        sym_type,
        visibility,
        nonvis,
        section,
        value: sym.address(),
        size: sym.size(),
    }
}

/// Whether an input file should be treated as a shared (dynamic) object
/// rather than a regular relocatable one, by its ELF `e_type`.
pub fn is_dynamic(file: &object::File<'_>) -> bool {
    file.kind() == object::ObjectKind::Dynamic
}
