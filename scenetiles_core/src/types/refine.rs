//! This module defines the `Refine` enum, the policy for combining a parent
//! tile's geometry with its children's.

use std::fmt::{Display, Formatter};

/// Refinement policy of a tile.
///
/// `Replace` means children fully substitute the parent's geometry, `Add`
/// means children supplement it. An unknown declared value is passed through
/// as [`Refine::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refine {
	Replace,
	Add,
	Other(String),
}

impl Refine {
	/// Normalizes a declared refinement string, case-insensitively.
	///
	/// # Examples
	/// ```
	/// use scenetiles_core::Refine;
	///
	/// assert_eq!(Refine::from_declared("REPLACE"), Refine::Replace);
	/// assert_eq!(Refine::from_declared("add"), Refine::Add);
	/// assert_eq!(Refine::from_declared("MERGE"), Refine::Other("MERGE".to_string()));
	/// ```
	#[must_use]
	pub fn from_declared(value: &str) -> Refine {
		if value.eq_ignore_ascii_case("replace") {
			Refine::Replace
		} else if value.eq_ignore_ascii_case("add") {
			Refine::Add
		} else {
			Refine::Other(value.to_string())
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Refine::Replace => "REPLACE",
			Refine::Add => "ADD",
			Refine::Other(value) => value,
		}
	}
}

impl Display for Refine {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
