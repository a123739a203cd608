/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! The target hook: a pluggable override point for architectures
//! with ABI-specific symbol semantics. When a target resolver is installed,
//! the core forwards the whole decision to it and performs no further work.

use crate::elf::ElfSym;
use crate::intern::NameId;
use crate::record::SymbolRecord;
use crate::table::ObjectId;

/// A target-specific resolver, dispatched once per incoming symbol before
/// the generic fingerprint/decision-matrix path runs.
pub trait TargetResolver {
    /// Resolves `existing` against `elf_sym`, mutating `existing` in place.
    /// The target owns the entire decision; the generic path never runs
    /// afterwards for this symbol.
    fn resolve(
        &mut self,
        existing: &mut SymbolRecord,
        elf_sym: &ElfSym,
        object: ObjectId,
        version: Option<NameId>,
    );
}
