use std::fmt;

/// States of the DEC/ECMA-48 control-sequence automaton.
///
/// The recognizer is always in exactly one of these fourteen states; there is
/// no terminal state, the automaton runs for as long as the caller keeps
/// feeding bytes. [`State::Ground`] is the initial state in which ordinary
/// printable bytes are passed through as text.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    #[default]
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    OscString,
    SosPmApcString,
}

impl State {
    /// Diagnostic name of the state.
    pub const fn name(self) -> &'static str {
        match self {
            State::Ground => "GROUND",
            State::Escape => "ESCAPE",
            State::EscapeIntermediate => "ESCAPE_INTERMEDIATE",
            State::CsiEntry => "CSI_ENTRY",
            State::CsiParam => "CSI_PARAM",
            State::CsiIntermediate => "CSI_INTERMEDIATE",
            State::CsiIgnore => "CSI_IGNORE",
            State::DcsEntry => "DCS_ENTRY",
            State::DcsParam => "DCS_PARAM",
            State::DcsIntermediate => "DCS_INTERMEDIATE",
            State::DcsPassthrough => "DCS_PASSTHROUGH",
            State::DcsIgnore => "DCS_IGNORE",
            State::OscString => "OSC_STRING",
            State::SosPmApcString => "SOS_PM_APC_STRING",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Actions produced by the automaton tables.
///
/// [`Action::None`] mirrors the zero entries of the generated transition
/// table: nothing happens for the byte beyond a possible state change. The
/// remaining variants fall into three behavioral classes, see
/// [`Parser`](crate::Parser) for how each class drives the event loop.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    #[default]
    None,
    Ignore,
    Print,
    Execute,
    Clear,
    Collect,
    Param,
    EscDispatch,
    CsiDispatch,
    Hook,
    Put,
    Unhook,
    OscStart,
    OscPut,
    OscEnd,
    Error,
}

impl Action {
    /// Diagnostic name of the action.
    pub const fn name(self) -> &'static str {
        match self {
            Action::None => "<no action>",
            Action::Ignore => "IGNORE",
            Action::Print => "PRINT",
            Action::Execute => "EXECUTE",
            Action::Clear => "CLEAR",
            Action::Collect => "COLLECT",
            Action::Param => "PARAM",
            Action::EscDispatch => "ESC_DISPATCH",
            Action::CsiDispatch => "CSI_DISPATCH",
            Action::Hook => "HOOK",
            Action::Put => "PUT",
            Action::Unhook => "UNHOOK",
            Action::OscStart => "OSC_START",
            Action::OscPut => "OSC_PUT",
            Action::OscEnd => "OSC_END",
            Action::Error => "ERROR",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
