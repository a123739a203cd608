/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! The fingerprint encoder: a 4-bit descriptor derived from three
//! independent flags (weakness, origin, kind) that the decision matrix in
//! [`crate::decision`] is keyed on.

use crate::diagnostics::Diagnostics;
use crate::elf::{Binding, ElfSym};

/// One of the 12 legal fingerprints a symbol occurrence can have.
///
/// Bit layout: bit 0 is weakness, bit 1 is origin, bits 2-3
/// are kind. `STB_LOCAL` and unrecognized bindings never reach this type —
/// [`encode`] reports a diagnostic and coerces them to `GLOBAL` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fingerprint {
    Def,
    WeakDef,
    DynDef,
    DynWeakDef,
    Undef,
    WeakUndef,
    DynUndef,
    DynWeakUndef,
    Common,
    WeakCommon,
    DynCommon,
    DynWeakCommon,
}

impl Fingerprint {
    /// Bits 2-3 of the descriptor: `0` def, `1` undef, `2` common.
    pub(crate) const fn from_bits(weak: bool, dynamic: bool, kind: Kind) -> Self {
        match (kind, weak, dynamic) {
            (Kind::Def, false, false) => Fingerprint::Def,
            (Kind::Def, true, false) => Fingerprint::WeakDef,
            (Kind::Def, false, true) => Fingerprint::DynDef,
            (Kind::Def, true, true) => Fingerprint::DynWeakDef,
            (Kind::Undef, false, false) => Fingerprint::Undef,
            (Kind::Undef, true, false) => Fingerprint::WeakUndef,
            (Kind::Undef, false, true) => Fingerprint::DynUndef,
            (Kind::Undef, true, true) => Fingerprint::DynWeakUndef,
            (Kind::Common, false, false) => Fingerprint::Common,
            (Kind::Common, true, false) => Fingerprint::WeakCommon,
            (Kind::Common, false, true) => Fingerprint::DynCommon,
            (Kind::Common, true, true) => Fingerprint::DynWeakCommon,
        }
    }

    pub const fn is_weak(self) -> bool {
        matches!(
            self,
            Fingerprint::WeakDef
                | Fingerprint::DynWeakDef
                | Fingerprint::WeakUndef
                | Fingerprint::DynWeakUndef
                | Fingerprint::WeakCommon
                | Fingerprint::DynWeakCommon
        )
    }

    pub const fn is_dynamic(self) -> bool {
        matches!(
            self,
            Fingerprint::DynDef
                | Fingerprint::DynWeakDef
                | Fingerprint::DynUndef
                | Fingerprint::DynWeakUndef
                | Fingerprint::DynCommon
                | Fingerprint::DynWeakCommon
        )
    }

    pub const fn is_common(self) -> bool {
        matches!(
            self,
            Fingerprint::Common
                | Fingerprint::WeakCommon
                | Fingerprint::DynCommon
                | Fingerprint::DynWeakCommon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Def,
    Undef,
    Common,
}

fn kind_of(sym: &ElfSym) -> Kind {
    if sym.is_undef() {
        Kind::Undef
    } else if sym.is_common() {
        Kind::Common
    } else {
        Kind::Def
    }
}

/// Exposed so [`crate::table`] can derive the *current* record's kind
/// without synthesizing a fake [`ElfSym`] for it.
pub(crate) fn kind_of_parts(section: crate::elf::SectionIndex, sym_type: crate::elf::SymType) -> Kind {
    use crate::elf::{SectionIndex, SymType};

    if matches!(section, SectionIndex::Undef) {
        Kind::Undef
    } else if matches!(section, SectionIndex::Common) || matches!(sym_type, SymType::Common) {
        Kind::Common
    } else {
        Kind::Def
    }
}

/// The plain `GLOBAL`/`WEAK` binding a fingerprint implies, for use by the
/// override engine once the encoder has already coerced away `LOCAL`/unknown
/// bindings.
pub fn effective_binding(fp: Fingerprint) -> Binding {
    if fp.is_weak() {
        Binding::Weak
    } else {
        Binding::Global
    }
}

/// Derives the fingerprint of an ELF symbol occurrence, reporting a
/// diagnostic (and coercing to `GLOBAL`) for an invalid binding.
///
/// `object` and `name` are used only to format the diagnostic strings from
/// the diagnostic strings; they do not affect the returned fingerprint.
pub fn encode(
    sym: &ElfSym,
    is_dynamic: bool,
    object: &str,
    name: &str,
    diagnostics: &mut dyn Diagnostics,
) -> Fingerprint {
    let weak = match sym.binding {
        Binding::Global => false,
        Binding::Weak => true,
        Binding::Local => {
            diagnostics.error(
                object,
                format_args!("invalid STB_LOCAL symbol {name} in external symbols"),
            );
            false
        }
        Binding::Unknown(n) => {
            diagnostics.error(
                object,
                format_args!("unsupported symbol binding {n} for symbol {name}"),
            );
            false
        }
    };

    Fingerprint::from_bits(weak, is_dynamic, kind_of(sym))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::PanicDiagnostics;
    use crate::elf::{SectionIndex, SymType, Visibility};

    fn def_sym() -> ElfSym {
        ElfSym {
            binding: Binding::Global,
            sym_type: SymType::Object,
            visibility: Visibility::Default,
            nonvis: 0,
            section: SectionIndex::Normal(1),
            value: 0x1000,
            size: 4,
        }
    }

    #[test]
    fn regular_strong_def() {
        let sym = def_sym();
        let mut diag = PanicDiagnostics;
        assert_eq!(
            encode(&sym, false, "a.o", "foo", &mut diag),
            Fingerprint::Def
        );
    }

    #[test]
    fn dynamic_weak_undef() {
        let mut sym = def_sym();
        sym.binding = Binding::Weak;
        sym.section = SectionIndex::Undef;
        let mut diag = PanicDiagnostics;
        assert_eq!(
            encode(&sym, true, "libfoo.so", "bar", &mut diag),
            Fingerprint::DynWeakUndef
        );
    }

    #[test]
    fn common_by_section_or_type() {
        let mut by_section = def_sym();
        by_section.section = SectionIndex::Common;
        let mut diag = PanicDiagnostics;
        assert_eq!(
            encode(&by_section, false, "a.o", "buf", &mut diag),
            Fingerprint::Common
        );

        let mut by_type = def_sym();
        by_type.sym_type = SymType::Common;
        assert_eq!(
            encode(&by_type, false, "a.o", "buf", &mut diag),
            Fingerprint::Common
        );
    }

    #[test]
    fn local_binding_is_coerced_and_reported() {
        let mut sym = def_sym();
        sym.binding = Binding::Local;
        let mut diag = crate::diagnostics::CollectingDiagnostics::new();
        let fp = encode(&sym, false, "a.o", "foo", &mut diag);
        assert_eq!(fp, Fingerprint::Def);
        assert_eq!(diag.diagnostics().len(), 1);
        assert_eq!(
            diag.diagnostics()[0].message,
            "invalid STB_LOCAL symbol foo in external symbols"
        );
    }
}
