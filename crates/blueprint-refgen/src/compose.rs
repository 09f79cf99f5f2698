// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pure identifier composer: ordered seed chain -> canonical digest.

use blake3::Hasher;
use blueprint_graph::GlobalId;

/// Domain separation prefix for permanent node identifiers.
const DOMAIN: &[u8] = b"ref:";

/// Composes a permanent identifier from a node's seed chain.
///
/// The chain is hashed in order — `type_name` first, then every ancestor/self
/// discriminator in `seed` — with each element length-prefixed (u64 LE) so
/// that element boundaries are unambiguous (`["ab","c"]` and `["a","bc"]`
/// hash differently). Order is significant and never sorted: it encodes the
/// node's path identity.
///
/// Output is the 32-byte BLAKE3 digest canonicalized as fixed-width
/// uppercase hex (64 chars). Pure and deterministic for equal inputs.
#[must_use]
pub fn compose(type_name: &str, seed: &[String]) -> GlobalId {
    let mut hasher = Hasher::new();
    hasher.update(DOMAIN);
    update_element(&mut hasher, type_name);
    for element in seed {
        update_element(&mut hasher, element);
    }
    GlobalId::new(hex::encode_upper(hasher.finalize().as_bytes()))
}

fn update_element(hasher: &mut Hasher, element: &str) {
    hasher.update(&(element.len() as u64).to_le_bytes());
    hasher.update(element.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(elements: &[&str]) -> Vec<String> {
        elements.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn equal_chains_compose_equal_ids() {
        let a = compose("Target", &chain(&["App", "App"]));
        let b = compose("Target", &chain(&["App", "App"]));
        assert_eq!(a, b);
    }

    #[test]
    fn order_is_significant() {
        let a = compose("Group", &chain(&["App", "Sources"]));
        let b = compose("Group", &chain(&["Sources", "App"]));
        assert_ne!(a, b);
    }

    #[test]
    fn element_boundaries_are_unambiguous() {
        let a = compose("Group", &chain(&["ab", "c"]));
        let b = compose("Group", &chain(&["a", "bc"]));
        assert_ne!(a, b);
    }

    #[test]
    fn type_name_separates_kinds() {
        let a = compose("Group", &chain(&["App", "Sources"]));
        let b = compose("FileReference", &chain(&["App", "Sources"]));
        assert_ne!(a, b);
    }

    #[test]
    fn output_is_fixed_width_uppercase_hex() {
        let id = compose("Project", &chain(&["App"]));
        assert_eq!(id.as_str().len(), 64);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }
}
