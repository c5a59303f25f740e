// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::AggregateContext;
use twinflow_error::Result;

/// Logic that combines two input channels into one output channel.
///
/// Implementations pull from `ctx.input1()` and `ctx.input2()` only as far as
/// they need to produce the next fragment, and write each fragment to
/// `ctx.output()` as soon as it is ready. They never open or close channels.
///
/// `aggregate` may return errors with `?` freely: the harness calls it through
/// [`crate::aggregate`], which turns errors and panics into a report.
pub trait Aggregator {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Run the aggregation to completion.
    ///
    /// # Errors
    /// Any failure reading the inputs, interpreting their content, or writing
    /// the output.
    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()>;
}

impl<A: Aggregator + ?Sized> Aggregator for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        (**self).aggregate(ctx)
    }
}

/// An [`Aggregator`] backed by a closure, created by [`from_fn`].
pub struct FnAggregator<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a named aggregator.
///
/// ```
/// use twinflow_core::{from_fn, Aggregator};
///
/// let concat = from_fn("copy-first", |ctx| {
///     while let Some(line) = ctx.input1().read_line()? {
///         ctx.output().write_line(&line)?;
///     }
///     ctx.input2().drain()?;
///     Ok(())
/// });
/// assert_eq!(concat.name(), "copy-first");
/// ```
pub fn from_fn<F>(name: impl Into<String>, f: F) -> FnAggregator<F>
where
    F: FnMut(&AggregateContext<'_>) -> Result<()>,
{
    FnAggregator {
        name: name.into(),
        f,
    }
}

impl<F> Aggregator for FnAggregator<F>
where
    F: FnMut(&AggregateContext<'_>) -> Result<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn aggregate(&mut self, ctx: &AggregateContext<'_>) -> Result<()> {
        (self.f)(ctx)
    }
}
