// self
use crate::{_prelude::*, connector::CapabilityKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedAugment<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedAugment<F> = F;

/// Span wrapping one authentication call made through a wrapped connector.
#[derive(Clone, Debug)]
pub struct AugmentSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AugmentSpan {
	/// Creates a new span tagged with the capability + stage.
	pub fn new(kind: CapabilityKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("extra_groups.augment", capability = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedAugment<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event after a group source answered.
pub fn trace_source_resolved(index: usize, prefix: &str, added: usize) {
	#[cfg(feature = "tracing")]
	tracing::debug!(source = index, prefix, added, "group source resolved");
	#[cfg(not(feature = "tracing"))]
	let _ = (index, prefix, added);
}

/// Emits a warning after a group source failed and the call was aborted.
pub fn trace_source_failed(index: usize, prefix: &str, error: &dyn StdError) {
	#[cfg(feature = "tracing")]
	tracing::warn!(source = index, prefix, error = %error, "group source failed");
	#[cfg(not(feature = "tracing"))]
	let _ = (index, prefix, error);
}

/// Emits an info event once a wrapped connector has been opened.
pub fn trace_connector_opened(id: &str, kind: CapabilityKind, sources: usize) {
	#[cfg(feature = "tracing")]
	tracing::info!(
		connector = id,
		capability = kind.as_str(),
		sources,
		"extra groups connector opened"
	);
	#[cfg(not(feature = "tracing"))]
	let _ = (id, kind, sources);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn event_helpers_without_subscriber() {
		trace_source_resolved(0, "a-", 2);
		trace_source_failed(1, "", &std::io::Error::other("boom"));
		trace_connector_opened("mock", CapabilityKind::Callback, 2);
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = AugmentSpan::new(CapabilityKind::Saml, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
