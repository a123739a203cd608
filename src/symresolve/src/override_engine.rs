/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! The override engine: field-for-field replacement of a
//! symbol record's contents. Ring propagation (walking `aliases` so every
//! member observes the same override) lives in [`crate::table`], which owns
//! the ring map; this module only ever touches one record at a time.

use crate::elf::{Binding, ElfSym};
use crate::intern::NameId;
use crate::record::{Source, SymbolRecord};
use crate::table::ObjectId;

/// Rewrites `existing` from an incoming ELF symbol.
///
/// `effective_binding` is the already-coerced binding (`GLOBAL`/`WEAK` only)
/// the fingerprint encoder derived from `elf_sym`; `STB_LOCAL`/unknown
/// bindings never reach this function; they were coerced and reported at
/// the encoding step.
pub fn override_fields(
    existing: &mut SymbolRecord,
    elf_sym: &ElfSym,
    effective_binding: Binding,
    object: ObjectId,
    is_dynamic: bool,
    version: Option<NameId>,
) {
    assert!(
        existing.source.is_from_object(),
        "override target must be an object-provided symbol; special symbols take a different path"
    );

    existing.source = Source::FromObject {
        object,
        section_index: elf_sym.section,
    };
    existing.sym_type = elf_sym.sym_type;
    existing.binding = effective_binding;
    existing.visibility = elf_sym.visibility;
    existing.nonvis = elf_sym.nonvis;

    existing.set_version_once(version);
    existing.mark_seen(is_dynamic);

    existing.value = elf_sym.value;
    existing.symsize = elf_sym.size;
}

/// Common-size reconciliation: regardless of which side
/// won, the resulting size is always `max(pre, incoming)`.
pub fn reconcile_common_size(existing: &mut SymbolRecord, pre_size: u64, incoming_size: u64) {
    existing.symsize = pre_size.max(incoming_size);
}

/// The special-symbol override: `target`'s identity (ring membership,
/// name) is preserved, but its definition is replaced wholesale from
/// `source`, another already-populated record.
///
/// Panics if `source`'s preconditions are violated — these are internal
/// invariant failures, never user-attributable.
pub fn override_with_special(target: &mut SymbolRecord, source: &SymbolRecord) {
    assert!(!source.flags.is_forwarder, "special symbol source must not be a forwarder");
    assert!(
        !source.flags.has_got_offset,
        "special symbol source must not already have a GOT offset"
    );
    assert!(
        !source.flags.has_plt_offset,
        "special symbol source must not already have a PLT offset"
    );
    assert!(
        !source.flags.has_warning,
        "special symbol source must not have a pending warning"
    );
    assert!(
        !source.flags.is_copied_from_dynobj,
        "special symbol source must not be copied from a dynamic object"
    );
    assert!(
        !source.flags.is_target_special || target.flags.is_target_special,
        "source marked is_target_special implies target is already marked special"
    );

    target.source = source.source;
    target.set_version_once(source.version);
    target.sym_type = source.sym_type;
    target.binding = source.binding;
    target.visibility = source.visibility;
    target.nonvis = source.nonvis;
    target.value = source.value;
    target.symsize = source.symsize;

    target.needs_dynsym_entry |= source.needs_dynsym_entry;
    target.needs_dynsym_value |= source.needs_dynsym_value;

    target.in_reg = true;
}
