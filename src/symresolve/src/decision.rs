/* SPDX-FileCopyrightText: © 2024-2026 symresolve contributors */
/* SPDX-License-Identifier: MIT */

//! The 12x12 decision matrix: the heart of the resolution core.
//!
//! [`decide`] is a pure, total function over the 144 legal fingerprint
//! pairs. Rows are grouped by their common decision and closed with a
//! wildcard arm per row; the compiler's exhaustiveness check over
//! [`Fingerprint`] stands in for the source's `unreachable` default.

use crate::fingerprint::Fingerprint;

/// The outcome of resolving one fingerprint pair, before the override
/// engine or common-size arithmetic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// `·`: keep the current definition, no side effect.
    Keep,
    /// `O`: the incoming symbol overrides the current one.
    Override,
    /// `C·`: keep the current carrier, but raise its size to the max of the two.
    AdjustCommonSize,
    /// `CO`: the incoming symbol overrides and becomes the carrier, with size
    /// raised to the max of the two.
    OverrideAndAdjustCommonSize,
    /// `E`: two strong definitions collide; the existing definition is kept
    /// and two diagnostics are reported by the caller.
    MultipleDefinitionError,
}

impl Decision {
    pub const fn overrides(self) -> bool {
        matches!(self, Decision::Override | Decision::OverrideAndAdjustCommonSize)
    }

    pub const fn adjusts_common_size(self) -> bool {
        matches!(
            self,
            Decision::AdjustCommonSize | Decision::OverrideAndAdjustCommonSize
        )
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Decision::MultipleDefinitionError)
    }
}

/// Decides what happens when `incoming` is resolved against `current`.
pub fn decide(current: Fingerprint, incoming: Fingerprint) -> Decision {
    use Decision::*;
    use Fingerprint::*;

    match current {
        Def => match incoming {
            Def => MultipleDefinitionError,
            _ => Keep,
        },

        WeakDef => match incoming {
            Def | Common => Override,
            _ => Keep,
        },

        DynDef => match incoming {
            Def | WeakDef | Common => Override,
            _ => Keep,
        },

        DynWeakDef => match incoming {
            Def | WeakDef | Common => Override,
            _ => Keep,
        },

        Undef => match incoming {
            Undef | WeakUndef | DynUndef | DynWeakUndef => Keep,
            _ => Override,
        },

        WeakUndef => match incoming {
            WeakUndef | DynUndef | DynWeakUndef => Keep,
            _ => Override,
        },

        DynUndef => match incoming {
            WeakUndef | DynUndef | DynWeakUndef => Keep,
            _ => Override,
        },

        DynWeakUndef => match incoming {
            WeakUndef | DynUndef | DynWeakUndef => Keep,
            _ => Override,
        },

        Common => match incoming {
            Def => Override,
            Common | DynCommon | DynWeakCommon => AdjustCommonSize,
            _ => Keep,
        },

        WeakCommon => match incoming {
            Def | Common => Override,
            WeakCommon | DynCommon | DynWeakCommon => AdjustCommonSize,
            _ => Keep,
        },

        DynCommon => match incoming {
            Def | WeakDef => Override,
            Common => OverrideAndAdjustCommonSize,
            DynCommon | DynWeakCommon => AdjustCommonSize,
            _ => Keep,
        },

        DynWeakCommon => match incoming {
            Def | WeakDef => Override,
            Common => OverrideAndAdjustCommonSize,
            DynCommon | DynWeakCommon => AdjustCommonSize,
            _ => Keep,
        },
    }
}
