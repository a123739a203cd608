/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! The global symbol table front end: owns the name→record map, the
//! weak-alias ring map, and the string interner, and exposes the single
//! entry point (`insert_or_resolve`) a driver calls per incoming symbol:
//! look the name up, and if new, insert; otherwise resolve against what's
//! already there.

use std::collections::HashMap;

use crate::decision::{self, Decision};
use crate::diagnostics::Diagnostics;
use crate::elf::{Binding, ElfSym, SectionIndex};
use crate::fingerprint::{self, Fingerprint};
use crate::intern::{Interner, NameId};
use crate::override_engine;
use crate::record::{Source, StickyFlags, SymbolRecord};
use crate::target_hook::TargetResolver;

/// A `Copy` handle into an object input, the Rust stand-in for a raw object
/// back-pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        ObjectId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Regular,
    Shared,
}

#[derive(Debug, Clone)]
struct ObjectInfo {
    name: String,
    kind: ObjectKind,
}

/// A `Copy` handle into the table's record arena, the Rust stand-in for a
/// raw symbol pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRef(u32);

impl SymbolRef {
    fn from_index(index: usize) -> Self {
        SymbolRef(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns every symbol record created during a link and the relations
/// (alias rings, interning, object registry) needed to resolve them.
pub struct GlobalSymbolTable {
    records: Vec<SymbolRecord>,
    by_name: HashMap<NameId, SymbolRef>,
    next_alias: HashMap<SymbolRef, SymbolRef>,
    interner: Interner,
    objects: Vec<ObjectInfo>,
    diagnostics: Box<dyn Diagnostics>,
    target_resolver: Option<Box<dyn TargetResolver>>,
}

impl GlobalSymbolTable {
    pub fn new(
        diagnostics: Box<dyn Diagnostics>,
        target_resolver: Option<Box<dyn TargetResolver>>,
    ) -> Self {
        Self {
            records: Vec::new(),
            by_name: HashMap::new(),
            next_alias: HashMap::new(),
            interner: Interner::new(),
            objects: Vec::new(),
            diagnostics,
            target_resolver,
        }
    }

    /// Registers an input object (regular or shared), returning the handle
    /// later `insert_or_resolve` calls attribute definitions to.
    pub fn register_object(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        self.objects.push(ObjectInfo {
            name: name.to_owned(),
            kind,
        });
        ObjectId::from_index(self.objects.len() - 1)
    }

    pub fn get(&self, r: SymbolRef) -> &SymbolRecord {
        &self.records[r.index()]
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolRef> {
        let id = self.interner.resolve_id(name)?;
        self.by_name.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolRecord)> {
        self.records
            .iter()
            .map(|r| (self.interner.resolve(r.name), r))
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }

    /// Establishes a weak-alias ring among already-inserted records:
    /// the records in `refs` become a circular sharing relation, where
    /// overriding any one of them must override all.
    pub fn declare_alias_ring(&mut self, refs: &[SymbolRef]) {
        if refs.len() < 2 {
            return;
        }
        for window in refs.windows(2) {
            self.next_alias.insert(window[0], window[1]);
        }
        self.next_alias.insert(refs[refs.len() - 1], refs[0]);
    }

    /// Looks the name up; if new, inserts and stops; otherwise resolves the
    /// incoming occurrence against the existing record.
    pub fn insert_or_resolve(
        &mut self,
        name: &str,
        version: Option<&str>,
        elf_sym: &ElfSym,
        object: ObjectId,
    ) -> SymbolRef {
        let name_id = self.interner.intern(name);

        if let Some(&existing) = self.by_name.get(&name_id) {
            self.resolve(existing, elf_sym, object, version);
            return existing;
        }

        let is_dynamic = self.objects[object.index()].kind == ObjectKind::Shared;
        let object_name = self.objects[object.index()].name.clone();
        let fp = fingerprint::encode(elf_sym, is_dynamic, &object_name, name, self.diagnostics.as_mut());
        let binding = fingerprint::effective_binding(fp);
        let version_id = version.map(|v| self.interner.intern(v));

        let mut record = SymbolRecord {
            name: name_id,
            version: None,
            source: Source::FromObject {
                object,
                section_index: elf_sym.section,
            },
            binding,
            sym_type: elf_sym.sym_type,
            visibility: elf_sym.visibility,
            nonvis: elf_sym.nonvis,
            value: elf_sym.value,
            symsize: elf_sym.size,
            in_reg: false,
            in_dyn: false,
            needs_dynsym_entry: false,
            needs_dynsym_value: false,
            flags: StickyFlags::default(),
        };
        record.set_version_once(version_id);
        record.mark_seen(is_dynamic);

        self.records.push(record);
        let r = SymbolRef::from_index(self.records.len() - 1);
        self.by_name.insert(name_id, r);
        r
    }

    /// The existing record already exists; decide what to do with the
    /// incoming occurrence and, if it wins, override the record and every
    /// member of its alias ring.
    fn resolve(&mut self, existing: SymbolRef, elf_sym: &ElfSym, object: ObjectId, version: Option<&str>) {
        let version_id = version.map(|v| self.interner.intern(v));

        if let Some(mut hook) = self.target_resolver.take() {
            hook.resolve(&mut self.records[existing.index()], elf_sym, object, version_id);
            self.target_resolver = Some(hook);
            return;
        }

        let is_dynamic = self.objects[object.index()].kind == ObjectKind::Shared;
        let object_name = self.objects[object.index()].name.clone();
        let name = self.interner.resolve(self.records[existing.index()].name).to_owned();

        let incoming_fp = fingerprint::encode(elf_sym, is_dynamic, &object_name, &name, self.diagnostics.as_mut());
        let effective_binding = fingerprint::effective_binding(incoming_fp);
        let current_fp = self.current_fingerprint(existing);

        let decision = decision::decide(current_fp, incoming_fp);

        match decision {
            Decision::MultipleDefinitionError => {
                self.diagnostics
                    .error(&object_name, format_args!("multiple definition of {name}"));
                let prev_object = self.origin_name(existing);
                self.diagnostics
                    .error(&prev_object, format_args!("previous definition here"));
            }
            Decision::Keep => {}
            Decision::AdjustCommonSize => {
                let pre_size = self.records[existing.index()].symsize;
                override_engine::reconcile_common_size(&mut self.records[existing.index()], pre_size, elf_sym.size);
            }
            Decision::Override | Decision::OverrideAndAdjustCommonSize => {
                self.apply_override(existing, elf_sym, effective_binding, object, is_dynamic, version_id, decision.adjusts_common_size());
            }
        }
    }

    fn apply_override(
        &mut self,
        existing: SymbolRef,
        elf_sym: &ElfSym,
        effective_binding: Binding,
        object: ObjectId,
        is_dynamic: bool,
        version_id: Option<NameId>,
        adjust_common_size: bool,
    ) {
        let pre_size = self.records[existing.index()].symsize;
        override_engine::override_fields(
            &mut self.records[existing.index()],
            elf_sym,
            effective_binding,
            object,
            is_dynamic,
            version_id,
        );
        if adjust_common_size {
            override_engine::reconcile_common_size(&mut self.records[existing.index()], pre_size, elf_sym.size);
        }

        self.propagate_override(existing, |record| {
            let pre_size = record.symsize;
            override_engine::override_fields(record, elf_sym, effective_binding, object, is_dynamic, version_id);
            if adjust_common_size {
                override_engine::reconcile_common_size(record, pre_size, elf_sym.size);
            }
        });
    }

    /// Walks `start`'s alias ring (if any), applying `apply` to every
    /// *other* member exactly once; `start` itself is not touched here —
    /// the caller already applied the override to it directly.
    fn propagate_override(&mut self, start: SymbolRef, mut apply: impl FnMut(&mut SymbolRecord)) {
        let Some(&first) = self.next_alias.get(&start) else {
            return;
        };

        let mut cur = first;
        while cur != start {
            apply(&mut self.records[cur.index()]);
            cur = *self
                .next_alias
                .get(&cur)
                .expect("alias ring must be closed");
        }
    }

    /// Re-runs the decision matrix with `incoming = (GLOBAL, regular, def)`,
    /// asserting the common-size side effect is never requested for this
    /// synthetic comparison.
    pub fn should_override_with_special(&self, existing: SymbolRef) -> bool {
        let current_fp = self.current_fingerprint(existing);
        let decision = decision::decide(current_fp, Fingerprint::Def);
        assert!(
            !decision.adjusts_common_size(),
            "should_override_with_special: matrix unexpectedly requested common-size adjustment"
        );
        decision.overrides()
    }

    /// Overrides `target` from `source`, another already-populated record,
    /// propagating across `target`'s alias ring the same way an ordinary
    /// override does.
    pub fn override_with_special(&mut self, target: SymbolRef, source: SymbolRef) {
        let source_snapshot = self.records[source.index()].clone();

        override_engine::override_with_special(&mut self.records[target.index()], &source_snapshot);
        self.propagate_override(target, |record| {
            override_engine::override_with_special(record, &source_snapshot);
        });
    }

    fn origin_name(&self, r: SymbolRef) -> String {
        match self.records[r.index()].source {
            Source::FromObject { object, .. } => self.objects[object.index()].name.clone(),
            Source::InOutputData | Source::InOutputSegment | Source::Constant => {
                "command line".to_string()
            }
        }
    }

    /// Derives the fingerprint of the record as it currently stands, using
    /// its stored binding/type/section (for `FromObject` records) or
    /// treating it as a regular definition (special symbols).
    fn current_fingerprint(&self, r: SymbolRef) -> Fingerprint {
        let record = &self.records[r.index()];

        let (kind, is_dynamic) = match record.source {
            Source::FromObject {
                object,
                section_index,
            } => {
                let is_dynamic = self.objects[object.index()].kind == ObjectKind::Shared;
                let kind = fingerprint::kind_of_parts(section_index, record.sym_type);
                (kind, is_dynamic)
            }
            Source::InOutputData | Source::InOutputSegment | Source::Constant => {
                (fingerprint::kind_of_parts(SectionIndex::Normal(0), record.sym_type), false)
            }
        };

        Fingerprint::from_bits(record.binding == Binding::Weak, is_dynamic, kind)
    }
}
