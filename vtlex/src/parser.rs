use std::ops::Range;

use log::trace;

use crate::enums::{Action, State};
use crate::transitions;

/// Maximum number of numeric parameters retained per control sequence.
/// Further parameters set the error flag and are dropped.
pub const MAX_PARAMS: usize = 16;

/// Maximum number of intermediate bytes retained per control sequence.
pub const MAX_INTERMEDIATES: usize = 2;

/// Position inside the per-byte processing cycle.
///
/// Every byte runs through up to four observable phases (exit action of the
/// old state, the byte's own action, entry action of the new state, the state
/// commit). The parser records where it stopped so that [`Parser::advance`]
/// can deliver one event, return to the caller and later resume mid-byte
/// without re-running phases that already fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Fetch the next byte and look up its transition.
    ReadByte,
    /// Run the exit action of the state being left.
    ExitAction,
    /// Run the action the table assigned to the byte itself.
    Action,
    /// Run the entry action of the state being entered.
    EntryAction,
    /// Make the state change effective.
    CommitTransition,
    /// Byte fully handled, loop back to [`Phase::ReadByte`].
    Rearm,
}

/// Incremental recognizer for DEC/ECMA-48 control sequences.
///
/// The parser consumes raw bytes through [`Parser::advance`] and pauses each
/// time an event is ready instead of invoking callbacks. After every call the
/// caller checks [`Parser::has_event`] and inspects the event through the
/// accessors ([`Parser::action`], [`Parser::byte`], [`Parser::params`],
/// [`Parser::intermediates`], [`Parser::run`]), then calls `advance` again
/// with the bytes not yet consumed. An empty buffer is a valid argument and
/// drains events that are still pending from an earlier byte.
///
/// Consecutive `Print`, `Put` and `OscPut` bytes are coalesced into a single
/// run per `advance` call; [`Parser::run`] locates the payload inside the
/// buffer passed to that same call, so the bytes are borrowed rather than
/// copied. A byte whose event cannot be delivered together with a pending run
/// is left unconsumed and is read again by the next call.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    phase: Phase,
    pending: (Option<State>, Action),
    action: Action,
    byte: u8,
    params: [u32; MAX_PARAMS],
    num_params: usize,
    intermediates: [u8; MAX_INTERMEDIATES],
    num_intermediates: usize,
    error: bool,
    run: Range<usize>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            state: State::Ground,
            phase: Phase::ReadByte,
            pending: (None, Action::None),
            action: Action::None,
            byte: 0,
            params: [0; MAX_PARAMS],
            num_params: 0,
            intermediates: [0; MAX_INTERMEDIATES],
            num_intermediates: 0,
            error: false,
            run: 0..0,
        }
    }
}

impl Parser {
    /// Creates a parser in [`State::Ground`] with no pending event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds bytes to the recognizer and returns how many were consumed.
    ///
    /// The call returns either when an event is ready or when the buffer is
    /// exhausted; the two cases are told apart with [`Parser::has_event`].
    /// Unconsumed bytes must be passed to the next call, a return value of
    /// `buf.len()` means the buffer is done. Offsets reported by
    /// [`Parser::run`] refer to `buf` as passed to this call.
    pub fn advance(&mut self, buf: &[u8]) -> usize {
        let mut consumed = 0usize;

        // The run and the delivered action belong to the previous call's
        // buffer; both start over here.
        self.run = 0..0;
        self.action = Action::None;

        loop {
            match self.phase {
                Phase::ReadByte => {
                    if consumed >= buf.len() {
                        if consumed > 0 {
                            // Leave the read phase so that a coalesced run
                            // (if any) is visible as an event.
                            self.phase = Phase::Rearm;
                        }
                        return consumed;
                    }
                    self.byte = buf[consumed];
                    consumed += 1;
                    self.pending = transitions::lookup(self.state, self.byte);
                    self.phase = if self.pending.0.is_some() {
                        Phase::ExitAction
                    } else {
                        Phase::Action
                    };
                },
                Phase::ExitAction => {
                    let action = transitions::exit_action(self.state);
                    if self.perform(action, &mut consumed) {
                        return consumed;
                    }
                },
                Phase::Action => {
                    if self.perform(self.pending.1, &mut consumed) {
                        return consumed;
                    }
                },
                Phase::EntryAction => {
                    let action = match self.pending.0 {
                        Some(next) => transitions::entry_action(next),
                        None => Action::None,
                    };
                    if self.perform(action, &mut consumed) {
                        return consumed;
                    }
                },
                Phase::CommitTransition => {
                    if let Some(next) = self.pending.0 {
                        trace!("state {} -> {}", self.state, next);
                        self.state = next;
                    }
                    self.phase = Phase::ReadByte;
                },
                Phase::Rearm => {
                    self.phase = Phase::ReadByte;
                },
            }
        }
    }

    /// Whether the last [`Parser::advance`] call stopped on an event.
    ///
    /// Events are suppressed while the error flag is set; the flag clears
    /// when the next escape or control sequence begins.
    pub fn has_event(&self) -> bool {
        !self.error && self.phase != Phase::ReadByte
    }

    /// Action of the last delivered event. [`Action::None`] when the last
    /// call consumed bytes without producing anything observable.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The byte that triggered the last dispatch event. For `CsiDispatch`
    /// and `EscDispatch` this is the final byte of the sequence.
    pub fn byte(&self) -> u8 {
        self.byte
    }

    /// Numeric parameters collected for the current sequence.
    pub fn params(&self) -> &[u32] {
        &self.params[..self.num_params]
    }

    /// Intermediate bytes collected for the current sequence.
    pub fn intermediates(&self) -> &[u8] {
        &self.intermediates[..self.num_intermediates]
    }

    /// Payload range of a `Print`, `Put` or `OscPut` event, as offsets into
    /// the buffer passed to the last [`Parser::advance`] call. Empty when the
    /// last event carried no payload.
    pub fn run(&self) -> Range<usize> {
        self.run.clone()
    }

    /// Sticky overflow flag, set when a sequence carries more parameters or
    /// intermediates than the parser retains.
    pub fn error(&self) -> bool {
        self.error
    }

    /// Current automaton state, for diagnostics.
    pub fn state(&self) -> State {
        self.state
    }

    /// Runs one action and steps the cycle to its next phase. Returns `true`
    /// when control must go back to the caller because an event is ready.
    fn perform(&mut self, action: Action, consumed: &mut usize) -> bool {
        let mut stop = false;

        match action {
            Action::None | Action::Ignore => {},

            Action::Print | Action::Put | Action::OscPut => {
                // Run actions only ever appear as the byte's own action, so
                // a byte was read in this call and `consumed` is at least 1.
                let idx = *consumed - 1;
                if self.run.is_empty() {
                    self.run = idx..idx + 1;
                    self.action = action;
                } else if self.run.end == idx {
                    self.run.end = idx + 1;
                    self.action = action;
                } else {
                    // The byte does not extend the pending run. Report the
                    // run first and read this byte again next time.
                    *consumed -= 1;
                    self.phase = Phase::Rearm;
                    return true;
                }
            },

            Action::Execute
            | Action::Hook
            | Action::OscStart
            | Action::OscEnd
            | Action::Unhook
            | Action::CsiDispatch
            | Action::EscDispatch => {
                if !self.run.is_empty() {
                    // A coalesced run precedes this event. Deliver the run
                    // and replay the byte; nothing effectful has happened
                    // for it yet, so the replay is exact.
                    *consumed -= 1;
                    self.phase = Phase::Rearm;
                    return true;
                }
                trace!(
                    "dispatch {} byte={:#04x} state={}",
                    action, self.byte, self.state
                );
                self.action = action;
                stop = true;
            },

            Action::Collect => {
                if self.num_intermediates == MAX_INTERMEDIATES {
                    self.error = true;
                } else {
                    self.intermediates[self.num_intermediates] = self.byte;
                    self.num_intermediates += 1;
                }
            },

            Action::Param => self.param_byte(),

            Action::Clear => {
                self.num_params = 0;
                self.num_intermediates = 0;
                self.error = false;
            },

            Action::Error => self.error = true,
        }

        self.phase = match self.pending.0 {
            None => Phase::Rearm,
            Some(_) => match self.phase {
                Phase::ExitAction => Phase::Action,
                Phase::Action => Phase::EntryAction,
                _ => Phase::CommitTransition,
            },
        };
        stop
    }

    /// Folds one parameter byte, either a separator or a decimal digit.
    fn param_byte(&mut self) {
        if self.byte == b';' {
            if self.num_params < MAX_PARAMS {
                self.params[self.num_params] = 0;
                self.num_params += 1;
            } else {
                self.error = true;
            }
        } else if !self.error {
            if self.num_params == 0 {
                self.params[0] = 0;
                self.num_params = 1;
            }
            let digit = u32::from(self.byte - b'0');
            let slot = &mut self.params[self.num_params - 1];
            *slot = slot.saturating_mul(10).saturating_add(digit);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn plain_text_coalesces_into_one_run() {
        let mut parser = Parser::new();
        let buf = b"Hello World";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::Print);
        assert_eq!(parser.run(), 0..buf.len());

        assert_eq!(parser.advance(&[]), 0);
        assert!(!parser.has_event());
    }

    #[test]
    fn control_byte_interrupts_a_run() {
        let mut parser = Parser::new();
        let buf = b"A\n";

        // The run is reported first; the newline stays unconsumed.
        assert_eq!(parser.advance(buf), 1);
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::Print);
        assert_eq!(parser.run(), 0..1);

        assert_eq!(parser.advance(&buf[1..]), 1);
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::Execute);
        assert_eq!(parser.byte(), b'\n');

        assert_eq!(parser.advance(&[]), 0);
        assert!(!parser.has_event());
    }

    #[test]
    fn empty_buffer_while_idle_is_a_no_op() {
        let mut parser = Parser::new();
        assert_eq!(parser.advance(&[]), 0);
        assert!(!parser.has_event());
        assert_eq!(parser.state(), State::Ground);
    }

    #[test]
    fn csi_with_params_and_intermediates() {
        let mut parser = Parser::new();
        let buf = b"\x1b[?25h";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::CsiDispatch);
        assert_eq!(parser.byte(), b'h');
        assert_eq!(parser.params(), &[25]);
        assert_eq!(parser.intermediates(), b"?");

        assert_eq!(parser.advance(&[]), 0);
        assert!(!parser.has_event());
    }

    #[test]
    fn semicolons_open_parameter_slots() {
        let mut parser = Parser::new();
        let buf = b"\x1b[38;2;255;128;255m";

        assert_eq!(parser.advance(buf), buf.len());
        assert_eq!(parser.action(), Action::CsiDispatch);
        assert_eq!(parser.params(), &[38, 2, 255, 128, 255]);
    }

    #[test]
    fn sixteen_parameters_fit_without_error() {
        let mut parser = Parser::new();
        let buf = b"\x1b[1;2;3;4;5;6;7;8;9;10;11;12;13;14;15;16m";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::CsiDispatch);
        assert_eq!(
            parser.params(),
            &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]
        );
        assert!(!parser.error());
    }

    #[test]
    fn seventeenth_parameter_sets_the_error_flag() {
        let mut parser = Parser::new();
        let buf = b"\x1b[1;2;3;4;5;6;7;8;9;10;11;12;13;14;15;16;17m";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.error());
        assert!(!parser.has_event());
        assert_eq!(parser.params().len(), MAX_PARAMS);
    }

    #[test]
    fn third_intermediate_sets_the_error_flag() {
        let mut parser = Parser::new();
        let buf = b"\x1b[!!!m";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.error());
        assert!(!parser.has_event());
        assert_eq!(parser.intermediates(), b"!!");
    }

    #[test]
    fn next_sequence_clears_the_error_flag() {
        let mut parser = Parser::new();

        let overflow = b"\x1b[!!!m";
        assert_eq!(parser.advance(overflow), overflow.len());
        assert!(parser.error());

        let ok = b"\x1b[0m";
        let mut off = 0;
        while off < ok.len() {
            off += parser.advance(&ok[off..]);
        }
        assert!(!parser.error());
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::CsiDispatch);
        assert_eq!(parser.params(), &[0]);
    }

    #[test]
    fn oversized_parameter_saturates() {
        let mut parser = Parser::new();
        let buf = b"\x1b[99999999999m";

        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.has_event());
        assert_eq!(parser.params(), &[u32::MAX]);
        assert!(!parser.error());
    }

    #[test]
    fn leading_semicolon_matches_digit_folding() {
        let mut parser = Parser::new();
        let buf = b"\x1b[;5m";

        assert_eq!(parser.advance(buf), buf.len());
        assert_eq!(parser.action(), Action::CsiDispatch);
        assert_eq!(parser.params(), &[5]);
    }

    #[test]
    fn osc_terminated_by_bel() {
        let mut parser = Parser::new();
        let buf = b"\x1b]0;title\x07";

        assert_eq!(parser.advance(buf), 2);
        assert_eq!(parser.action(), Action::OscStart);

        // Payload run; the BEL that follows stays unconsumed.
        assert_eq!(parser.advance(&buf[2..]), 7);
        assert_eq!(parser.action(), Action::OscPut);
        assert_eq!(&buf[2..][parser.run()], b"0;title");

        assert_eq!(parser.advance(&buf[9..]), 1);
        assert_eq!(parser.action(), Action::OscEnd);

        assert_eq!(parser.advance(&[]), 0);
        assert!(!parser.has_event());
        assert_eq!(parser.state(), State::Ground);
    }

    #[test]
    fn dcs_payload_is_hooked_and_unhooked() {
        let mut parser = Parser::new();
        let buf = b"\x1bPqAB\x1b\\";

        assert_eq!(parser.advance(buf), 3);
        assert_eq!(parser.action(), Action::Hook);

        assert_eq!(parser.advance(&buf[3..]), 2);
        assert_eq!(parser.action(), Action::Put);
        assert_eq!(&buf[3..][parser.run()], b"AB");

        assert_eq!(parser.advance(&buf[5..]), 1);
        assert_eq!(parser.action(), Action::Unhook);

        assert_eq!(parser.advance(&buf[6..]), 1);
        assert_eq!(parser.action(), Action::EscDispatch);
        assert_eq!(parser.byte(), b'\\');
    }

    #[test]
    fn cancel_inside_dcs_unhooks_then_executes() {
        let mut parser = Parser::new();
        let buf = b"\x1bPqAB\x18C";

        assert_eq!(parser.advance(buf), 3);
        assert_eq!(parser.action(), Action::Hook);

        assert_eq!(parser.advance(&buf[3..]), 2);
        assert_eq!(parser.action(), Action::Put);

        // One byte, two events: the CAN both ends the string and executes.
        assert_eq!(parser.advance(&buf[5..]), 1);
        assert_eq!(parser.action(), Action::Unhook);

        assert_eq!(parser.advance(&buf[6..]), 0);
        assert_eq!(parser.action(), Action::Execute);
        assert_eq!(parser.byte(), 0x18);

        assert_eq!(parser.advance(&buf[6..]), 1);
        assert_eq!(parser.action(), Action::Print);
        assert_eq!(&buf[6..][parser.run()], b"C");
    }

    #[test]
    fn run_offsets_are_relative_to_the_current_buffer() {
        let mut parser = Parser::new();
        let buf = b"\x1b[??25hABC";

        // The malformed sequence is swallowed without an event; only the
        // trailing text surfaces, anchored where it starts.
        assert_eq!(parser.advance(buf), buf.len());
        assert!(parser.has_event());
        assert_eq!(parser.action(), Action::Print);
        assert_eq!(parser.run(), 7..10);
        assert_eq!(&buf[parser.run()], b"ABC");
    }
}
