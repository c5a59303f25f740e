// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::failure_injection::FailingWriter;
use crate::shared_buffer::SharedBuffer;
use std::io::Cursor;
use twinflow_core::{AggregateContext, FlushPolicy, InputChannel, InputId, OutputChannel};

/// The three channels of one invocation, backed by memory.
///
/// The output writes into [`sink`](Self::sink), which stays readable while
/// and after the aggregator runs.
#[derive(Debug)]
pub struct TestChannels {
    pub input1: InputChannel,
    pub input2: InputChannel,
    pub output: OutputChannel,
    pub sink: SharedBuffer,
}

impl TestChannels {
    /// Channels reading the given text, writing to a fresh buffer.
    #[must_use]
    pub fn new(input1: &str, input2: &str) -> Self {
        Self::from_bytes(input1.as_bytes(), input2.as_bytes())
    }

    #[must_use]
    pub fn from_bytes(input1: &[u8], input2: &[u8]) -> Self {
        Self::with_inputs(
            memory_input(InputId::Input1, input1),
            memory_input(InputId::Input2, input2),
        )
    }

    /// Use prepared input channels, writing to a fresh buffer.
    #[must_use]
    pub fn with_inputs(input1: InputChannel, input2: InputChannel) -> Self {
        let sink = SharedBuffer::new();
        Self {
            input1,
            input2,
            output: OutputChannel::new(sink.clone()),
            sink,
        }
    }

    /// Channels whose output accepts `limit` bytes and then fails.
    #[must_use]
    pub fn with_output_limit(input1: &str, input2: &str, limit: usize) -> Self {
        let sink = SharedBuffer::new();
        Self {
            input1: memory_input(InputId::Input1, input1.as_bytes()),
            input2: memory_input(InputId::Input2, input2.as_bytes()),
            output: OutputChannel::new(FailingWriter::new(sink.clone(), limit)),
            sink,
        }
    }

    /// Replace the output with one using `policy`, keeping the inputs.
    #[must_use]
    pub fn with_flush_policy(self, policy: FlushPolicy) -> Self {
        let sink = SharedBuffer::new();
        Self {
            input1: self.input1,
            input2: self.input2,
            output: OutputChannel::with_flush_policy(sink.clone(), policy),
            sink,
        }
    }

    /// Bind the channels into a context.
    ///
    /// # Panics
    ///
    /// Never in practice: the inputs are created with matching ids.
    #[must_use]
    pub fn context(&self) -> AggregateContext<'_> {
        AggregateContext::new(&self.input1, &self.input2, &self.output)
            .expect("test channels are distinct and correctly identified")
    }

    /// Output written so far.
    #[must_use]
    pub fn output_string(&self) -> String {
        self.sink.as_string()
    }
}

/// An input channel over an in-memory copy of `data`.
#[must_use]
pub fn memory_input(id: InputId, data: &[u8]) -> InputChannel {
    InputChannel::new(id, Cursor::new(data.to_vec()))
}
