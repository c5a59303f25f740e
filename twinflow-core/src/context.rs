// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_status::InputId;
use crate::input_channel::InputChannel;
use crate::output_channel::OutputChannel;
use twinflow_error::{AggregateError, Result};

/// The three channels of one aggregation invocation.
///
/// The harness owns the channels and lends them to the aggregator through this
/// context for the duration of a single call. Accessors never fail and always
/// return the same channel, so read and write positions carry over between
/// calls.
///
/// # Examples
///
/// ```
/// use std::io::{self, Cursor};
/// use twinflow_core::{AggregateContext, InputChannel, InputId, OutputChannel};
///
/// let input1 = InputChannel::new(InputId::Input1, Cursor::new("a\n"));
/// let input2 = InputChannel::new(InputId::Input2, Cursor::new("b\n"));
/// let output = OutputChannel::new(io::sink());
///
/// let ctx = AggregateContext::new(&input1, &input2, &output).unwrap();
/// assert!(std::ptr::eq(ctx.input1(), ctx.input1()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AggregateContext<'a> {
    input1: &'a InputChannel,
    input2: &'a InputChannel,
    output: &'a OutputChannel,
}

impl<'a> AggregateContext<'a> {
    /// Bind the channels of one invocation.
    ///
    /// # Errors
    /// Returns `AggregateError::InvalidState` unless `input1` and `input2` are
    /// two distinct channels identified as [`InputId::Input1`] and
    /// [`InputId::Input2`].
    pub fn new(
        input1: &'a InputChannel,
        input2: &'a InputChannel,
        output: &'a OutputChannel,
    ) -> Result<Self> {
        if std::ptr::eq(input1, input2) {
            return Err(AggregateError::invalid_state(
                "input1 and input2 refer to the same channel",
            ));
        }
        if input1.id() != InputId::Input1 || input2.id() != InputId::Input2 {
            return Err(AggregateError::invalid_state(format!(
                "channels bound out of order: {} as input1, {} as input2",
                input1.id(),
                input2.id()
            )));
        }

        Ok(Self {
            input1,
            input2,
            output,
        })
    }

    #[must_use]
    pub fn input1(&self) -> &'a InputChannel {
        self.input1
    }

    #[must_use]
    pub fn input2(&self) -> &'a InputChannel {
        self.input2
    }

    #[must_use]
    pub fn input(&self, id: InputId) -> &'a InputChannel {
        match id {
            InputId::Input1 => self.input1,
            InputId::Input2 => self.input2,
        }
    }

    /// Both inputs, in order.
    #[must_use]
    pub fn inputs(&self) -> [&'a InputChannel; 2] {
        [self.input1, self.input2]
    }

    #[must_use]
    pub fn output(&self) -> &'a OutputChannel {
        self.output
    }
}
