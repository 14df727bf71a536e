use proptest::prelude::*;

use ppml_types::{Confirmation, ContentHash, Identity, ProviderLedger};

proptest! {
    /// ContentHash roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn content_hash_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        prop_assert_eq!(hash.as_bytes(), &bytes);
    }

    /// ContentHash::is_zero is true only for all-zero bytes.
    #[test]
    fn content_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// Display output parses back to the same hash.
    #[test]
    fn content_hash_display_parses(bytes in prop::array::uniform32(0u8..)) {
        let hash = ContentHash::new(bytes);
        let parsed: ContentHash = hash.to_string().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Equality of hashes is exactly equality of their bytes.
    #[test]
    fn content_hash_equality_is_bytewise(
        a in prop::array::uniform32(0u8..),
        b in prop::array::uniform32(0u8..),
    ) {
        prop_assert_eq!(ContentHash::new(a) == ContentHash::new(b), a == b);
    }

    /// A ledger built from distinct claimants indexes each one at its insertion position.
    #[test]
    fn ledger_index_matches_insertion_order(n in 1usize..32) {
        let mut ledger = ProviderLedger::new();
        for i in 0..n {
            let claimant = Identity::new(format!("owner{i}"));
            ledger.push(Confirmation::pending(claimant, ContentHash::new([i as u8; 32]))).unwrap();
        }
        prop_assert_eq!(ledger.len(), n);
        for i in 0..n {
            let claimant = Identity::new(format!("owner{i}"));
            prop_assert_eq!(ledger.position_of(&claimant), Some(i));
            prop_assert_eq!(&ledger.records()[i].claimant, &claimant);
        }
    }
}
