//! Group augmentation: merge groups from every configured source into an identity.
//!
//! Sources run one after another in configured order. Each source's groups are prefixed with
//! that source's prefix and appended after the identity's own groups; the combined list is then
//! deduplicated keeping the first occurrence of every name. A failing source aborts the whole
//! call and hands the identity back exactly as it came in.

// self
use crate::{
	_prelude::*,
	connector::Identity,
	error::LookupError,
	groups::GroupLookup,
	obs,
};

/// One configured group source: a prefix plus the lookup that backs it.
pub struct GroupSource {
	prefix: String,
	lookup: Box<dyn GroupLookup>,
}
impl GroupSource {
	/// Pairs a lookup with the prefix applied to its groups.
	pub fn new(prefix: impl Into<String>, lookup: impl 'static + GroupLookup) -> Self {
		Self::boxed(prefix, Box::new(lookup))
	}

	/// Pairs an already boxed lookup with its prefix.
	pub fn boxed(prefix: impl Into<String>, lookup: Box<dyn GroupLookup>) -> Self {
		Self { prefix: prefix.into(), lookup }
	}

	/// Prefix applied to every group this source contributes.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}
}
impl Debug for GroupSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GroupSource").field("prefix", &self.prefix).finish_non_exhaustive()
	}
}

/// A group source failed; augmentation was abandoned for this call.
#[derive(Debug, ThisError)]
#[error("Group source #{index} (prefix `{prefix}`) failed.")]
pub struct AugmentError {
	/// The identity as it was passed in, without groups from any source.
	pub identity: Identity,
	/// Position of the failing source in configured order.
	pub index: usize,
	/// Prefix of the failing source.
	pub prefix: String,
	/// Failure reported by the source.
	#[source]
	pub source: LookupError,
}
impl From<AugmentError> for Error {
	fn from(e: AugmentError) -> Self {
		Error::Lookup(e.source)
	}
}

/// Ordered list of group sources applied to every authenticated identity.
#[derive(Debug, Default)]
pub struct GroupAugmenter {
	sources: Vec<GroupSource>,
}
impl GroupAugmenter {
	/// Creates an augmenter over `sources`, applied in the given order.
	pub fn new(sources: Vec<GroupSource>) -> Self {
		Self { sources }
	}

	/// Appends another source after the existing ones.
	pub fn with_source(mut self, source: GroupSource) -> Self {
		self.sources.push(source);

		self
	}

	/// Configured sources in application order.
	pub fn sources(&self) -> &[GroupSource] {
		&self.sources
	}

	/// Number of configured sources.
	pub fn len(&self) -> usize {
		self.sources.len()
	}

	/// Whether no sources are configured.
	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Returns `identity` with groups from every source merged in.
	///
	/// Only `groups` changes. With no sources the identity is returned as is, duplicates
	/// included.
	pub async fn add_groups(&self, identity: Identity) -> Result<Identity, AugmentError> {
		if self.sources.is_empty() {
			return Ok(identity);
		}

		let mut merged = identity.groups.clone();

		for (index, source) in self.sources.iter().enumerate() {
			let result = source.lookup.lookup(&identity).await;
			let found = match result {
				Ok(found) => found,
				Err(e) => {
					obs::trace_source_failed(index, &source.prefix, &e);

					return Err(AugmentError {
						identity,
						index,
						prefix: source.prefix.clone(),
						source: e,
					});
				},
			};

			obs::trace_source_resolved(index, &source.prefix, found.len());
			merged.extend(found.into_iter().map(|group| with_prefix(&source.prefix, group)));
		}

		Ok(identity.with_groups(dedup_preserving_order(merged)))
	}
}

fn with_prefix(prefix: &str, group: String) -> String {
	if prefix.is_empty() { group } else { format!("{prefix}{group}") }
}

fn dedup_preserving_order(groups: Vec<String>) -> Vec<String> {
	let mut seen = HashSet::with_capacity(groups.len());

	groups.into_iter().filter(|group| seen.insert(group.clone())).collect()
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};
	// self
	use super::*;
	use crate::groups::{LookupFuture, StaticGroups};

	struct Failing;
	impl GroupLookup for Failing {
		fn lookup<'a>(&'a self, _identity: &'a Identity) -> LookupFuture<'a> {
			Box::pin(async { Err(LookupError::backend("directory timed out")) })
		}
	}

	#[derive(Default)]
	struct Counting(Arc<AtomicUsize>);
	impl GroupLookup for Counting {
		fn lookup<'a>(&'a self, _identity: &'a Identity) -> LookupFuture<'a> {
			self.0.fetch_add(1, Ordering::SeqCst);

			Box::pin(async { Ok(vec!["counted".to_owned()]) })
		}
	}

	fn fixed(prefix: &str, groups: &[&str]) -> GroupSource {
		GroupSource::new(prefix, StaticGroups::new(groups.iter().copied()))
	}

	fn identity(groups: &[&str]) -> Identity {
		Identity {
			user_id: "0-385-28089-0".into(),
			username: "Kilgore Trout".into(),
			email: "kilgore@kilgore.trout".into(),
			email_verified: true,
			groups: groups.iter().map(|g| (*g).to_owned()).collect(),
			connector_data: b"opaque".to_vec(),
		}
	}

	#[tokio::test]
	async fn merges_in_configured_order() {
		let cases: Vec<(Vec<GroupSource>, Vec<&str>, Vec<&str>)> = vec![
			(vec![fixed("", &["one"])], vec![], vec!["one"]),
			(vec![fixed("", &[])], vec![], vec![]),
			(vec![fixed("", &["one"])], vec!["existing"], vec!["existing", "one"]),
			(vec![fixed("", &["one"]), fixed("", &["two"])], vec![], vec!["one", "two"]),
			(
				vec![fixed("", &["one"]), fixed("", &["two"])],
				vec!["existing"],
				vec!["existing", "one", "two"],
			),
			(vec![fixed("", &["one"]), fixed("", &["one"])], vec![], vec!["one"]),
			(
				vec![fixed("", &["one"]), fixed("", &["two"]), fixed("", &["one", "three"])],
				vec![],
				vec!["one", "two", "three"],
			),
			(
				vec![fixed("a-", &["one"]), fixed("b-", &["one"]), fixed("a-", &["one"])],
				vec![],
				vec!["a-one", "b-one"],
			),
			(vec![fixed("a-", &["one"]), fixed("b-", &["one"])], vec![], vec!["a-one", "b-one"]),
			(vec![fixed("a-", &["one"])], vec!["one"], vec!["one", "a-one"]),
			(vec![fixed("", &["x"])], vec!["b", "a", "b"], vec!["b", "a", "x"]),
		];

		for (i, (sources, input, expected)) in cases.into_iter().enumerate() {
			let augmenter = GroupAugmenter::new(sources);
			let got = augmenter
				.add_groups(identity(&input))
				.await
				.unwrap_or_else(|e| panic!("Case {i} should augment without error: {e}"));

			assert_eq!(got, identity(&expected), "Case {i} produced unexpected groups.");
		}
	}

	#[tokio::test]
	async fn no_sources_preserves_duplicates() {
		let input = identity(&["dup", "dup", "other"]);
		let got = GroupAugmenter::default()
			.add_groups(input.clone())
			.await
			.expect("Augmenting without sources should succeed.");

		assert_eq!(got, input);
	}

	#[tokio::test]
	async fn failure_discards_earlier_sources() {
		let counter = Arc::new(AtomicUsize::new(0));
		let augmenter = GroupAugmenter::default()
			.with_source(fixed("a-", &["one"]))
			.with_source(GroupSource::new("b-", Failing))
			.with_source(GroupSource::new("c-", Counting(counter.clone())));
		let input = identity(&["existing"]);
		let err = augmenter
			.add_groups(input.clone())
			.await
			.expect_err("A failing source should abort augmentation.");

		assert_eq!(err.identity, input);
		assert_eq!(err.index, 1);
		assert_eq!(err.prefix, "b-");
		assert_eq!(counter.load(Ordering::SeqCst), 0, "Later sources must not run.");
		assert!(matches!(Error::from(err), Error::Lookup(LookupError::Backend { .. })));
	}

	#[tokio::test]
	async fn repeated_augmentation_is_stable_for_deterministic_sources() {
		let augmenter = GroupAugmenter::default()
			.with_source(fixed("a-", &["one", "two"]))
			.with_source(fixed("", &["three"]));
		let once = augmenter
			.add_groups(identity(&["zero"]))
			.await
			.expect("First augmentation should succeed.");
		let twice =
			augmenter.add_groups(once.clone()).await.expect("Second augmentation should succeed.");

		assert_eq!(once.groups, ["zero", "a-one", "a-two", "three"]);
		assert_eq!(twice, once);
	}

	#[tokio::test]
	async fn concurrent_calls_share_one_augmenter() {
		let augmenter = Arc::new(GroupAugmenter::default().with_source(fixed("", &["shared"])));
		let handles: Vec<_> = (0..8)
			.map(|_| {
				let augmenter = augmenter.clone();

				tokio::spawn(async move { augmenter.add_groups(identity(&[])).await })
			})
			.collect();

		for handle in handles {
			let got = handle
				.await
				.expect("Augmentation task should not panic.")
				.expect("Augmentation should succeed.");

			assert_eq!(got.groups, ["shared"]);
		}
	}
}
