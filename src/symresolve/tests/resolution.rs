/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! End-to-end resolution scenarios, exercised through the public
//! `GlobalSymbolTable` API exactly as a driver would.

use pretty_assertions::assert_eq;

use symresolve::{
    Binding, CollectingDiagnostics, ElfSym, GlobalSymbolTable, ObjectKind, SectionIndex, SymType,
    Visibility,
};

fn sym(binding: Binding, sym_type: SymType, section: SectionIndex, value: u64, size: u64) -> ElfSym {
    ElfSym {
        binding,
        sym_type,
        visibility: Visibility::Default,
        nonvis: 0,
        section,
        value,
        size,
    }
}

fn def(binding: Binding, value: u64) -> ElfSym {
    sym(binding, SymType::Func, SectionIndex::Normal(1), value, 0)
}

fn new_table() -> GlobalSymbolTable {
    GlobalSymbolTable::new(Box::new(CollectingDiagnostics::new()), None)
}

#[test]
fn strong_overrides_weak() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let b = table.register_object("b.o", ObjectKind::Regular);

    table.insert_or_resolve("foo", None, &def(Binding::Weak, 0x1000), a);
    table.insert_or_resolve("foo", None, &def(Binding::Global, 0x2000), b);

    let r = table.lookup("foo").unwrap();
    let record = table.get(r);
    assert_eq!(record.binding, Binding::Global);
    assert_eq!(record.value, 0x2000);
}

#[test]
fn multiple_strong_definition_is_an_error() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let b = table.register_object("b.o", ObjectKind::Regular);

    table.insert_or_resolve("foo", None, &def(Binding::Global, 0x1000), a);
    table.insert_or_resolve("foo", None, &def(Binding::Global, 0x2000), b);

    let r = table.lookup("foo").unwrap();
    let record = table.get(r);
    assert_eq!(record.value, 0x1000, "the first strong definition is kept");

    let collecting = table
        .diagnostics()
        .as_any()
        .downcast_ref::<CollectingDiagnostics>()
        .unwrap();
    assert_eq!(collecting.diagnostics().len(), 2);
    assert_eq!(collecting.diagnostics()[0].object, "b.o");
    assert_eq!(collecting.diagnostics()[1].object, "a.o");
}

#[test]
fn common_size_reconciliation_picks_the_max() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let b = table.register_object("b.o", ObjectKind::Regular);

    let common_sym = |size| sym(Binding::Global, SymType::Common, SectionIndex::Common, 0, size);

    table.insert_or_resolve("buf", None, &common_sym(8), a);
    table.insert_or_resolve("buf", None, &common_sym(64), b);

    let r = table.lookup("buf").unwrap();
    assert_eq!(table.get(r).symsize, 64);
}

#[test]
fn dynamic_definition_is_shadowed_by_a_regular_one() {
    let mut table = new_table();
    let shared = table.register_object("libfoo.so", ObjectKind::Shared);
    let regular = table.register_object("a.o", ObjectKind::Regular);

    table.insert_or_resolve("foo", None, &def(Binding::Global, 0xbeef), shared);
    table.insert_or_resolve("foo", None, &def(Binding::Global, 0x1000), regular);

    let r = table.lookup("foo").unwrap();
    let record = table.get(r);
    assert_eq!(record.value, 0x1000);
    assert!(record.in_reg);
    assert!(record.in_dyn);
}

#[test]
fn weak_alias_ring_propagates_an_override_to_every_member() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let b = table.register_object("b.o", ObjectKind::Regular);

    let r1 = table.insert_or_resolve("weak_one", None, &def(Binding::Weak, 0x10), a);
    let r2 = table.insert_or_resolve("weak_two", None, &def(Binding::Weak, 0x10), a);
    table.declare_alias_ring(&[r1, r2]);

    table.insert_or_resolve("weak_one", None, &def(Binding::Global, 0x9999), b);

    assert_eq!(table.get(r1).value, 0x9999);
    assert_eq!(table.get(r2).value, 0x9999, "the ring partner must observe the same override");
    assert_eq!(table.get(r1).binding, table.get(r2).binding);
}

#[test]
fn special_symbol_override_propagates_to_every_ring_member() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let b = table.register_object("b.o", ObjectKind::Regular);

    let r1 = table.insert_or_resolve("etext", None, &def(Binding::Weak, 0x10), a);
    let r2 = table.insert_or_resolve("_etext", None, &def(Binding::Weak, 0x10), a);
    table.declare_alias_ring(&[r1, r2]);

    let special = table.insert_or_resolve("__special_etext", None, &def(Binding::Global, 0xface), b);

    assert!(table.should_override_with_special(r1));
    table.override_with_special(r1, special);

    let source_record = table.get(special).clone();
    for ring_member in [r1, r2] {
        let record = table.get(ring_member);
        assert_eq!(record.value, source_record.value, "ring member must take the special symbol's value");
        assert_eq!(record.symsize, source_record.symsize);
        assert_eq!(record.binding, source_record.binding);
        assert_eq!(record.sym_type, source_record.sym_type);
        assert!(record.in_reg, "override_with_special marks every overridden record in_reg");
    }
}

#[test]
fn undef_followed_by_a_dynamic_definition_is_overridden() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);
    let shared = table.register_object("libfoo.so", ObjectKind::Shared);

    let undef_sym = sym(Binding::Global, SymType::NoType, SectionIndex::Undef, 0, 0);
    table.insert_or_resolve("bar", None, &undef_sym, a);
    table.insert_or_resolve("bar", None, &def(Binding::Global, 0x4000), shared);

    let r = table.lookup("bar").unwrap();
    let record = table.get(r);
    assert_eq!(record.value, 0x4000);
    assert!(record.in_dyn);
}

#[test]
fn invalid_local_binding_is_coerced_and_reported_without_crashing() {
    let mut table = new_table();
    let a = table.register_object("a.o", ObjectKind::Regular);

    table.insert_or_resolve("local_name", None, &def(Binding::Local, 0x10), a);

    let r = table.lookup("local_name").unwrap();
    assert_eq!(table.get(r).binding, Binding::Global);

    let collecting = table
        .diagnostics()
        .as_any()
        .downcast_ref::<CollectingDiagnostics>()
        .unwrap();
    assert!(collecting.has_errors());
}
