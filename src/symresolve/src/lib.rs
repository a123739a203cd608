/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! Symbol resolution core for a static ELF linker: decides, for every name
//! seen across a set of input objects and shared libraries, which
//! occurrence becomes the link's definitive definition.
//!
//! The algorithm is split into four independent layers, composed by
//! [`table::GlobalSymbolTable`]:
//!
//! - [`fingerprint`] reduces an ELF symbol occurrence plus its origin to
//!   one of twelve legal descriptors.
//! - [`decision`] is a pure function from a pair of descriptors to an
//!   outcome: keep, override, adjust a common size, or report a collision.
//! - [`override_engine`] carries an outcome out: rewriting a stored record
//!   field-for-field, or reconciling a tentative-definition size.
//! - [`table`] owns the records themselves, the name table, and the
//!   alias-ring relationships between them, and drives the other three
//!   layers per incoming symbol.
//!
//! [`diagnostics`] is the sink every user-attributable failure is reported
//! through; [`target_hook`] is the escape hatch an embedder can install to
//! override the whole per-symbol decision for architectures with
//! non-standard semantics.

pub mod decision;
pub mod diagnostics;
pub mod elf;
pub mod fingerprint;
pub mod intern;
pub mod override_engine;
pub mod record;
pub mod table;
pub mod target_hook;

pub use decision::Decision;
pub use diagnostics::{CollectingDiagnostics, Diagnostic, Diagnostics, PanicDiagnostics};
pub use elf::{Binding, ElfSym, SectionIndex, SymType, Visibility};
pub use fingerprint::Fingerprint;
pub use intern::{Interner, NameId};
pub use record::{Source, StickyFlags, SymbolRecord};
pub use table::{GlobalSymbolTable, ObjectId, ObjectKind, SymbolRef};
pub use target_hook::TargetResolver;
