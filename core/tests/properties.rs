//! Property-based tests for the signing and hashing invariants.
//!
//! - Codec: fixed-length values round-trip; every other length is rejected.
//! - Signing: signatures verify, and any single-bit change breaks them.
//! - Vectors: signing pieces equals signing the concatenation.
//! - Hashing: any chunking of a buffer through a session matches one-shot.
//! - Sessions: interleaved sessions never see each other's bytes.

use proptest::prelude::*;

use vecsign::codec::{self, ArtifactKind, CodecError};
use vecsign::crypto::{
    sha512, sign_blob, sign_vector, verify_blob, HashSessionRegistry, Keypair, Signature,
};

/// Seeded keypairs keep shrinking deterministic.
fn arb_keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

fn arb_segments() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 0..8)
}

/// A buffer together with ascending cut points inside it.
fn arb_chunked() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    prop::collection::vec(any::<u8>(), 0..512).prop_flat_map(|data| {
        let len = data.len();
        (
            Just(data),
            prop::collection::vec(0..=len, 0..10).prop_map(|mut cuts| {
                cuts.sort_unstable();
                cuts
            }),
        )
    })
}

fn split_at_cuts<'a>(data: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        chunks.push(&data[start..cut]);
        start = cut;
    }
    chunks.push(&data[start..]);
    chunks
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn key_text_roundtrips(key in any::<[u8; 32]>()) {
        prop_assert_eq!(codec::unfmt_key(&codec::fmt_key(&key)).unwrap(), key);
        prop_assert_eq!(codec::unfmt_hash(&codec::fmt_hash(&key)).unwrap(), key);
    }

    #[test]
    fn signature_text_roundtrips(bytes in prop::collection::vec(any::<u8>(), 64)) {
        let sig: [u8; 64] = bytes.as_slice().try_into().unwrap();
        prop_assert_eq!(codec::unfmt_sig(&codec::fmt_sig(&sig)).unwrap(), sig);
    }

    #[test]
    fn wrong_lengths_rejected(bytes in prop::collection::vec(any::<u8>(), 0..100)) {
        let text = codec::encode(&bytes);
        for kind in [ArtifactKind::Key, ArtifactKind::Signature, ArtifactKind::Hash] {
            let result = codec::decode(&text, kind);
            if bytes.len() == kind.expected_len() {
                prop_assert_eq!(result.unwrap(), bytes.clone());
            } else {
                prop_assert_eq!(
                    result,
                    Err(CodecError::InvalidLength {
                        kind,
                        expected: kind.expected_len(),
                        actual: bytes.len(),
                    })
                );
            }
        }
    }

    #[test]
    fn signatures_verify(kp in arb_keypair(), msg in prop::collection::vec(any::<u8>(), 0..256)) {
        let sig = sign_blob(kp.signing_key(), kp.verifying_key(), &msg).unwrap();
        prop_assert!(verify_blob(kp.verifying_key(), &sig, &msg));
    }

    #[test]
    fn message_bit_flip_breaks_signature(
        kp in arb_keypair(),
        msg in prop::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let sig = sign_blob(kp.signing_key(), kp.verifying_key(), &msg).unwrap();
        let mut tampered = msg.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 1 << bit;
        prop_assert!(!verify_blob(kp.verifying_key(), &sig, &tampered));
    }

    #[test]
    fn signature_bit_flip_breaks_signature(
        kp in arb_keypair(),
        msg in prop::collection::vec(any::<u8>(), 0..128),
        index in 0usize..64,
        bit in 0u8..8,
    ) {
        let sig = sign_blob(kp.signing_key(), kp.verifying_key(), &msg).unwrap();
        let mut bytes = sig.to_bytes();
        bytes[index] ^= 1 << bit;
        prop_assert!(!verify_blob(kp.verifying_key(), &Signature::from_bytes(bytes), &msg));
    }

    #[test]
    fn unrelated_key_rejects(
        kp in arb_keypair(),
        other in arb_keypair(),
        msg in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(kp.verifying_key() != other.verifying_key());
        let sig = sign_blob(kp.signing_key(), kp.verifying_key(), &msg).unwrap();
        prop_assert!(!verify_blob(other.verifying_key(), &sig, &msg));
    }

    #[test]
    fn vector_signature_equals_concatenation(kp in arb_keypair(), segments in arb_segments()) {
        let parts: Vec<&[u8]> = segments.iter().map(Vec::as_slice).collect();
        let joined = segments.concat();
        let sig = sign_vector(kp.signing_key(), kp.verifying_key(), &parts).unwrap();
        prop_assert!(verify_blob(kp.verifying_key(), &sig, &joined));
        prop_assert_eq!(sig, sign_blob(kp.signing_key(), kp.verifying_key(), &joined).unwrap());
    }

    #[test]
    fn chunked_session_equals_one_shot((data, cuts) in arb_chunked()) {
        let registry = HashSessionRegistry::new();
        let handle = registry.open();
        for chunk in split_at_cuts(&data, &cuts) {
            registry.update(handle, chunk).unwrap();
        }
        prop_assert_eq!(registry.finalize(handle).unwrap(), sha512(&data));
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn interleaved_sessions_isolated(
        a in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
        b in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..8),
    ) {
        let registry = HashSessionRegistry::new();
        let ha = registry.open();
        let hb = registry.open();
        for i in 0..a.len().max(b.len()) {
            if let Some(chunk) = a.get(i) {
                registry.update(ha, chunk).unwrap();
            }
            if let Some(chunk) = b.get(i) {
                registry.update(hb, chunk).unwrap();
            }
        }
        prop_assert_eq!(registry.finalize(ha).unwrap(), sha512(&a.concat()));
        prop_assert_eq!(registry.finalize(hb).unwrap(), sha512(&b.concat()));
    }
}
