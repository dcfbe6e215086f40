//! Shared client scaffolding owned by every generated root client.

/// Input and output protocols plus the per-connection sequence counter.
#[derive(Debug)]
pub struct ClientChannel<I, O> {
    input: I,
    output: O,
    seq_id: i32,
}

impl<I, O> ClientChannel<I, O> {
    /// Creates a channel whose first call uses sequence id 0.
    #[must_use]
    pub fn new(input: I, output: O) -> Self {
        Self::with_seq_id(input, output, 0)
    }

    /// Creates a channel starting at the given sequence id.
    #[must_use]
    pub fn with_seq_id(input: I, output: O, seq_id: i32) -> Self {
        Self {
            input,
            output,
            seq_id,
        }
    }

    /// Returns the id for the next call and advances the counter.
    pub fn next_seq_id(&mut self) -> i32 {
        let id = self.seq_id;
        self.seq_id = self.seq_id.wrapping_add(1);
        id
    }

    /// Returns the id the next call will use.
    #[must_use]
    pub fn seq_id(&self) -> i32 {
        self.seq_id
    }

    /// Returns the input protocol.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Returns the output protocol.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the channel and returns its protocols.
    #[must_use]
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{BinaryInput, BinaryOutput};
    use crate::protocol::OutputProtocol;

    #[test]
    fn test_seq_id_increments() {
        let mut channel = ClientChannel::new(BinaryInput::default(), BinaryOutput::new());
        assert_eq!(channel.next_seq_id(), 0);
        assert_eq!(channel.next_seq_id(), 1);
        assert_eq!(channel.seq_id(), 2);
    }

    #[test]
    fn test_seq_id_wraps() {
        let mut channel = ClientChannel::with_seq_id((), (), i32::MAX);
        assert_eq!(channel.next_seq_id(), i32::MAX);
        assert_eq!(channel.next_seq_id(), i32::MIN);
    }

    #[test]
    fn test_into_parts() {
        let mut channel = ClientChannel::new(BinaryInput::default(), BinaryOutput::new());
        channel.output_mut().write_i32(1).unwrap();
        let (_, output) = channel.into_parts();
        assert_eq!(output.len(), 4);
    }
}
