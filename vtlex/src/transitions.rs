//! Transition tables for the control-sequence automaton.
//!
//! Each function in this module covers one automaton state: given an input
//! byte it returns the [`Transition`] pair of an optional next state and the
//! [`Action`] to run for the byte. A `None` next state means the byte is
//! handled in place and no entry/exit actions fire. The content encodes the
//! DEC/ANSI parser state machine with one deliberate deviation: bytes with
//! the high bit set are never interpreted as C1 controls, so multi-byte
//! UTF-8 text passes through [`State::Ground`] and [`State::OscString`]
//! untouched. Escape-introduced C1 aliases (`ESC [`, `ESC ]`, `ESC P`,
//! `ESC X/^/_`) are unaffected.

use crate::enums::{Action, State};

/// Packed transition pair looked up per `(state, byte)`.
pub(crate) type Transition = (Option<State>, Action);

/// Bytes that are handled identically in every state: CAN and SUB abort the
/// current sequence, ESC starts a new one.
#[inline(always)]
const fn anywhere(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x18 | 0x1a => (Some(Ground), Execute),
        0x1b => (Some(Escape), None),
        _ => (Option::None, None),
    }
}

/// Ground state handling printable data and C0 controls.
#[inline(always)]
const fn ground(byte: u8) -> Transition {
    use Action::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x20..=0x7f | 0x80..=0xff => (Option::None, Print),
        _ => anywhere(byte),
    }
}

/// ESC state waiting for the byte that identifies the sequence family.
#[inline(always)]
const fn escape(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x7f => (Option::None, Ignore),
        0x20..=0x2f => (Some(EscapeIntermediate), Collect),
        0x30..=0x4f | 0x51..=0x57 | 0x59 | 0x5a | 0x5c | 0x60..=0x7e => {
            (Some(Ground), EscDispatch)
        },
        0x5b => (Some(CsiEntry), None),
        0x5d => (Some(OscString), None),
        0x50 => (Some(DcsEntry), None),
        0x58 | 0x5e | 0x5f => (Some(SosPmApcString), None),
        _ => anywhere(byte),
    }
}

/// ESC state collecting intermediate bytes before dispatch.
#[inline(always)]
const fn escape_intermediate(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x20..=0x2f => (Option::None, Collect),
        0x7f => (Option::None, Ignore),
        0x30..=0x7e => (Some(Ground), EscDispatch),
        _ => anywhere(byte),
    }
}

/// CSI entry point routing parameter, intermediate and final bytes.
#[inline(always)]
const fn csi_entry(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x7f => (Option::None, Ignore),
        0x20..=0x2f => (Some(CsiIntermediate), Collect),
        0x3a => (Some(CsiIgnore), None),
        0x30..=0x39 | 0x3b => (Some(CsiParam), Param),
        0x3c..=0x3f => (Some(CsiParam), Collect),
        0x40..=0x7e => (Some(Ground), CsiDispatch),
        _ => anywhere(byte),
    }
}

/// CSI parameter collection handling numeric fields and separators.
#[inline(always)]
const fn csi_param(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x30..=0x39 | 0x3b => (Option::None, Param),
        0x7f => (Option::None, Ignore),
        0x3a | 0x3c..=0x3f => (Some(CsiIgnore), None),
        0x20..=0x2f => (Some(CsiIntermediate), Collect),
        0x40..=0x7e => (Some(Ground), CsiDispatch),
        _ => anywhere(byte),
    }
}

/// CSI intermediate bytes prior to the final byte.
#[inline(always)]
const fn csi_intermediate(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x20..=0x2f => (Option::None, Collect),
        0x7f => (Option::None, Ignore),
        0x30..=0x3f => (Some(CsiIgnore), None),
        0x40..=0x7e => (Some(Ground), CsiDispatch),
        _ => anywhere(byte),
    }
}

/// Malformed CSI sequence; consume quietly until the final byte.
#[inline(always)]
const fn csi_ignore(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f => (Option::None, Execute),
        0x20..=0x3f | 0x7f => (Option::None, Ignore),
        0x40..=0x7e => (Some(Ground), None),
        _ => anywhere(byte),
    }
}

/// DCS entry point. Unlike CSI, C0 controls inside a DCS introducer are
/// silently dropped rather than executed.
#[inline(always)]
const fn dcs_entry(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (Option::None, Ignore),
        0x3a => (Some(DcsIgnore), None),
        0x20..=0x2f => (Some(DcsIntermediate), Collect),
        0x30..=0x39 | 0x3b => (Some(DcsParam), Param),
        0x3c..=0x3f => (Some(DcsParam), Collect),
        0x40..=0x7e => (Some(DcsPassthrough), None),
        _ => anywhere(byte),
    }
}

/// DCS parameter collection, equivalent to [`csi_param`] for DCS strings.
#[inline(always)]
const fn dcs_param(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (Option::None, Ignore),
        0x30..=0x39 | 0x3b => (Option::None, Param),
        0x3a | 0x3c..=0x3f => (Some(DcsIgnore), None),
        0x20..=0x2f => (Some(DcsIntermediate), Collect),
        0x40..=0x7e => (Some(DcsPassthrough), None),
        _ => anywhere(byte),
    }
}

/// DCS intermediate bytes prior to entering passthrough mode.
#[inline(always)]
const fn dcs_intermediate(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x7f => (Option::None, Ignore),
        0x20..=0x2f => (Option::None, Collect),
        0x30..=0x3f => (Some(DcsIgnore), None),
        0x40..=0x7e => (Some(DcsPassthrough), None),
        _ => anywhere(byte),
    }
}

/// DCS passthrough forwarding payload bytes. High-bit bytes are payload too,
/// so sixel data and UTF-8 encoded strings survive intact.
#[inline(always)]
const fn dcs_passthrough(byte: u8) -> Transition {
    use Action::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0x7e | 0x80..=0xff => {
            (Option::None, Put)
        },
        0x7f => (Option::None, Ignore),
        _ => anywhere(byte),
    }
}

/// Malformed DCS sequence; swallow everything until CAN, SUB or ESC.
#[inline(always)]
const fn dcs_ignore(byte: u8) -> Transition {
    use Action::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0xff => {
            (Option::None, Ignore)
        },
        _ => anywhere(byte),
    }
}

/// OSC payload collection until BEL or ST is observed. BEL terminates the
/// string without itself becoming payload or an execute event.
#[inline(always)]
const fn osc_string(byte: u8) -> Transition {
    use Action::*;
    use State::*;

    match byte {
        0x07 => (Some(Ground), None),
        0x00..=0x06 | 0x08..=0x17 | 0x19 | 0x1c..=0x1f => {
            (Option::None, Ignore)
        },
        0x20..=0x7f | 0x80..=0xff => (Option::None, OscPut),
        _ => anywhere(byte),
    }
}

/// SOS/PM/APC strings are recognized and skipped.
#[inline(always)]
const fn sos_pm_apc_string(byte: u8) -> Transition {
    use Action::*;

    match byte {
        0x00..=0x17 | 0x19 | 0x1c..=0x1f | 0x20..=0xff => {
            (Option::None, Ignore)
        },
        _ => anywhere(byte),
    }
}

/// Action to run upon entering a state, before the next byte is read.
#[inline(always)]
pub(crate) const fn entry_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        Escape | CsiEntry | DcsEntry => Clear,
        DcsPassthrough => Hook,
        OscString => OscStart,
        _ => None,
    }
}

/// Action to run after leaving a state, finalizing the string in flight.
#[inline(always)]
pub(crate) const fn exit_action(state: State) -> Action {
    use Action::*;
    use State::*;

    match state {
        DcsPassthrough => Unhook,
        OscString => OscEnd,
        _ => None,
    }
}

/// Core transition lookup delegating to the state-specific tables.
#[inline(always)]
pub(crate) const fn lookup(state: State, byte: u8) -> Transition {
    use State::*;

    match state {
        Ground => ground(byte),
        Escape => escape(byte),
        EscapeIntermediate => escape_intermediate(byte),
        CsiEntry => csi_entry(byte),
        CsiParam => csi_param(byte),
        CsiIntermediate => csi_intermediate(byte),
        CsiIgnore => csi_ignore(byte),
        DcsEntry => dcs_entry(byte),
        DcsParam => dcs_param(byte),
        DcsIntermediate => dcs_intermediate(byte),
        DcsPassthrough => dcs_passthrough(byte),
        DcsIgnore => dcs_ignore(byte),
        OscString => osc_string(byte),
        SosPmApcString => sos_pm_apc_string(byte),
    }
}
