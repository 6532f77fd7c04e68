//! An incremental, pull-based recognizer for DEC/ECMA-48 terminal control
//! sequences, built around Paul Williams' parser state machine.
//!
//! The crate splits a raw terminal byte stream into events: printable text,
//! executed control bytes, and dispatched escape, CSI, OSC and DCS sequences.
//! It assigns no meaning to the sequences it recognizes; interpreting `CUP`
//! or an OSC title change is the caller's business.
//!
//! Unlike callback-driven parsers, [`Parser::advance`] returns to the caller
//! each time an event is ready and reports how many input bytes it consumed.
//! The caller inspects the event, then resumes with the remaining bytes. This
//! inversion suits single-threaded event loops that cannot give the parser
//! control of the stack, and it lets printable payloads be borrowed straight
//! from the input buffer instead of being copied.
//!
//! Input is treated as opaque bytes: UTF-8 sequences are neither validated
//! nor decoded, and bytes with the high bit set pass through printable and
//! string payloads untouched. 8-bit C1 controls are consequently not
//! recognized; their 7-bit `ESC`-introduced aliases are.
//!
//! ```
//! use vtlex::{Action, Parser};
//!
//! let mut parser = Parser::new();
//! let input = b"\x1b[1mbold";
//!
//! let n = parser.advance(input);
//! assert!(parser.has_event());
//! assert_eq!(parser.action(), Action::CsiDispatch);
//! assert_eq!(parser.byte(), b'm');
//! assert_eq!(parser.params(), &[1]);
//!
//! let n = n + parser.advance(&input[n..]);
//! assert_eq!(parser.action(), Action::Print);
//! assert_eq!(n, input.len());
//! ```

mod enums;
mod parser;
mod transitions;

pub use enums::{Action, State};
pub use parser::{MAX_INTERMEDIATES, MAX_PARAMS, Parser};
