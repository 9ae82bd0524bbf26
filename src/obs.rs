//! Optional observability helpers for wrapped connectors.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `extra_groups.augment` with the `capability` and
//!   `stage` (call site) fields, plus per-source events from the augmenter.
//! - Enable `metrics` to increment the `extra_groups_augment_total` counter for every
//!   attempt/success/failure/skip, labeled by `capability` + `outcome`.

mod tracing;

pub use tracing::*;

// self
use crate::{_prelude::*, connector::CapabilityKind};

/// Outcome labels recorded for each wrapped authentication call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AugmentOutcome {
	/// The base connector produced an identity and augmentation started.
	Attempt,
	/// Every group source answered and the identity was augmented.
	Success,
	/// A group source failed; the request was aborted.
	Failure,
	/// The base connector failed or rejected the password; nothing was augmented.
	Skipped,
}
impl AugmentOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AugmentOutcome::Attempt => "attempt",
			AugmentOutcome::Success => "success",
			AugmentOutcome::Failure => "failure",
			AugmentOutcome::Skipped => "skipped",
		}
	}
}
impl Display for AugmentOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records an augmentation outcome via the global metrics recorder (when enabled).
pub fn record_augment_outcome(kind: CapabilityKind, outcome: AugmentOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"extra_groups_augment_total",
		"capability" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);
	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}
