//! Server-side dispatch of call messages to handler logic.

use crate::error::{Error, Result};
use crate::exception::{ApplicationException, ApplicationExceptionKind};
use crate::protocol::{InputProtocol, OutputProtocol};
use crate::wire::{MessageHeader, MessageKind, WireKind};

/// Routes decoded call messages to handler methods.
///
/// Generated processors implement [`Processor::dispatch`] over a static
/// capability table; the provided [`Processor::process`] reads one message
/// and answers unknown functions with an `UnknownMethod` exception reply.
pub trait Processor {
    /// Handles the body of a call whose header has already been read.
    ///
    /// Returns `Ok(false)` without consuming input when no handler entry
    /// exists for `header.name`.
    fn dispatch(
        &mut self,
        header: &MessageHeader,
        input: &mut dyn InputProtocol,
        output: &mut dyn OutputProtocol,
    ) -> Result<bool>;

    /// Reads one call message and dispatches it.
    ///
    /// Returns `Ok(true)` if a handler ran and `Ok(false)` if the function was
    /// unknown and an exception reply was written instead.
    fn process(
        &mut self,
        input: &mut dyn InputProtocol,
        output: &mut dyn OutputProtocol,
    ) -> Result<bool> {
        let header = input.read_message_begin()?;
        if self.dispatch(&header, input, output)? {
            return Ok(true);
        }

        tracing::warn!(
            "No handler for function={} seq_id={}",
            header.name,
            header.seq_id
        );
        input.skip(WireKind::Struct)?;
        input.read_message_end()?;
        let x = ApplicationException::new(
            ApplicationExceptionKind::UnknownMethod,
            format!("Function {} not implemented.", header.name),
        );
        output.write_message_begin(&MessageHeader::new(
            header.name,
            MessageKind::Exception,
            header.seq_id,
        ))?;
        x.write(output)?;
        output.write_message_end()?;
        output.flush()?;
        Ok(false)
    }
}

/// Moves a declared exception out of `error` into `slot`.
///
/// Returns `None` when the error was a [`Error::User`] holding an `E`,
/// otherwise hands the error back so the caller can try the next slot.
pub fn capture<E>(error: Error, slot: &mut Option<E>) -> Option<Error>
where
    E: std::error::Error + 'static,
{
    match error {
        Error::User(inner) => match inner.downcast::<E>() {
            Ok(exception) => {
                *slot = Some(*exception);
                None
            }
            Err(inner) => Some(Error::User(inner)),
        },
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{BinaryInput, BinaryOutput};
    use crate::wire::FieldHeader;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct Busy;

    impl fmt::Display for Busy {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "busy")
        }
    }

    impl std::error::Error for Busy {}

    #[derive(Debug)]
    struct Other;

    impl fmt::Display for Other {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "other")
        }
    }

    impl std::error::Error for Other {}

    struct PingProcessor {
        pings: u32,
    }

    impl Processor for PingProcessor {
        fn dispatch(
            &mut self,
            header: &MessageHeader,
            input: &mut dyn InputProtocol,
            output: &mut dyn OutputProtocol,
        ) -> Result<bool> {
            if header.name != "ping" {
                return Ok(false);
            }
            input.skip(WireKind::Struct)?;
            input.read_message_end()?;
            self.pings += 1;
            output.write_message_begin(&MessageHeader::new(
                "ping",
                MessageKind::Reply,
                header.seq_id,
            ))?;
            output.write_struct_begin("ping_result")?;
            output.write_field_stop()?;
            output.write_struct_end()?;
            output.write_message_end()?;
            output.flush()?;
            Ok(true)
        }
    }

    fn call(name: &str, seq_id: i32) -> BinaryInput {
        let mut output = BinaryOutput::new();
        output
            .write_message_begin(&MessageHeader::new(name, MessageKind::Call, seq_id))
            .unwrap();
        output.write_struct_begin("args").unwrap();
        output
            .write_field_begin(&FieldHeader::new("n", WireKind::I32, 1))
            .unwrap();
        output.write_i32(1).unwrap();
        output.write_field_end().unwrap();
        output.write_field_stop().unwrap();
        output.write_struct_end().unwrap();
        output.write_message_end().unwrap();
        BinaryInput::new(output.into_bytes())
    }

    #[test]
    fn test_process_known_function() {
        let mut processor = PingProcessor { pings: 0 };
        let mut input = call("ping", 3);
        let mut output = BinaryOutput::new();
        assert!(processor.process(&mut input, &mut output).unwrap());
        assert_eq!(processor.pings, 1);

        let mut reply = BinaryInput::new(output.into_bytes());
        let header = reply.read_message_begin().unwrap();
        assert_eq!(header.kind, MessageKind::Reply);
        assert_eq!(header.seq_id, 3);
    }

    #[test]
    fn test_process_unknown_function() {
        let mut processor = PingProcessor { pings: 0 };
        let mut input = call("frobnicate", 11);
        let mut output = BinaryOutput::new();
        assert!(!processor.process(&mut input, &mut output).unwrap());
        assert_eq!(processor.pings, 0);
        assert_eq!(input.remaining(), 0);

        let mut reply = BinaryInput::new(output.into_bytes());
        let header = reply.read_message_begin().unwrap();
        assert_eq!(header.kind, MessageKind::Exception);
        assert_eq!(header.name, "frobnicate");
        assert_eq!(header.seq_id, 11);
        let x = ApplicationException::read(&mut reply).unwrap();
        assert_eq!(x.kind, ApplicationExceptionKind::UnknownMethod);
        assert_eq!(x.message, "Function frobnicate not implemented.");
    }

    #[test]
    fn test_capture_matching_type() {
        let mut slot: Option<Busy> = None;
        assert!(capture(Error::user(Busy), &mut slot).is_none());
        assert_eq!(slot, Some(Busy));
    }

    #[test]
    fn test_capture_passes_through() {
        let mut slot: Option<Busy> = None;
        let pending = capture(Error::user(Other), &mut slot);
        assert!(matches!(pending, Some(Error::User(_))));
        assert!(slot.is_none());

        let pending = capture(
            Error::protocol(crate::ProtocolErrorKind::InvalidData, "bad"),
            &mut slot,
        );
        assert!(pending.and_then(|e| e.protocol_kind()).is_some());
    }
}
