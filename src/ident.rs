//! Locally generated identifiers for payment instructions and FAPI metadata.
//!
//! Instruction and end-to-end identifiers concatenate a fixed prefix with a random base36
//! suffix. Uniqueness is best effort only—no registry is kept and collisions are not checked—
//! which is acceptable at relay volumes because these identifiers are not a security boundary.
//! Interaction identifiers are fresh UUIDs generated per outbound call.

// crates.io
use rand::Rng;
use uuid::Uuid;

/// Prefix applied to instruction identifiers.
pub const INSTRUCTION_PREFIX: &str = "PMT";
/// Prefix applied to end-to-end identifiers.
pub const END_TO_END_PREFIX: &str = "TRX";

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Returns a fresh instruction identifier (`PMT.` + random suffix).
pub fn instruction_id() -> String {
	prefixed(INSTRUCTION_PREFIX)
}

/// Returns a fresh end-to-end identifier (`TRX.` + random suffix).
pub fn end_to_end_id() -> String {
	prefixed(END_TO_END_PREFIX)
}

/// Returns a fresh `x-fapi-interaction-id` value.
pub fn interaction_id() -> String {
	Uuid::new_v4().to_string()
}

fn prefixed(prefix: &str) -> String {
	let mut rng = rand::rng();
	let mut id = String::with_capacity(prefix.len() + 1 + SUFFIX_LEN);

	id.push_str(prefix);
	id.push('.');

	for _ in 0..SUFFIX_LEN {
		id.push(SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char);
	}

	id
}
