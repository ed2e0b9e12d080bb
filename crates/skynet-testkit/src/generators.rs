//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use skynet_core::{
    Blake2bHash, DataKey, Ed25519PublicKey, Ed25519Signature, Keypair, RegistryEntry, Skylink,
    MAX_ENTRY_DATA_SIZE, MAX_REVISION,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Blake2bHash.
pub fn blake2b_hash() -> impl Strategy<Value = Blake2bHash> {
    any::<[u8; 32]>().prop_map(Blake2bHash)
}

/// Generate a random Ed25519PublicKey.
pub fn public_key() -> impl Strategy<Value = Ed25519PublicKey> {
    keypair().prop_map(|kp| kp.public_key())
}

/// Generate a data key, either plain or already hashed.
pub fn data_key() -> impl Strategy<Value = DataKey> {
    prop_oneof![
        "[a-zA-Z0-9._/-]{0,48}".prop_map(DataKey::plain),
        blake2b_hash().prop_map(DataKey::Hashed),
    ]
}

/// Generate entry data that fits in a registry entry.
pub fn entry_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=MAX_ENTRY_DATA_SIZE)
}

/// Generate a revision that can still be incremented.
pub fn revision() -> impl Strategy<Value = u64> {
    prop_oneof![0u64..1000, 0u64..MAX_REVISION]
}

/// Generate a v1 skylink.
///
/// Offsets and fetch sizes are drawn from the layouts the bitfield can hold.
pub fn skylink_v1() -> impl Strategy<Value = Skylink> {
    (blake2b_hash(), 0u64..1024, 1u64..=4096).prop_filter_map(
        "unencodable offset",
        |(root, offset_kib, fetch_size)| Skylink::new_v1(&root, offset_kib * 4096, fetch_size).ok(),
    )
}

/// Generate a v2 skylink.
pub fn skylink_v2() -> impl Strategy<Value = Skylink> {
    (public_key(), blake2b_hash()).prop_map(|(pk, tweak)| Skylink::new_v2(&pk, &tweak))
}

/// Generate either skylink version.
pub fn skylink() -> impl Strategy<Value = Skylink> {
    prop_oneof![skylink_v1(), skylink_v2()]
}

/// Generate a small JSON value.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate a JSON document, as stored by SkyDB.
pub fn json_document() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z_]{1,12}", json_value(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

/// Parameters for generating a signed registry entry.
#[derive(Debug, Clone)]
pub struct EntryParams {
    pub keypair: Keypair,
    pub data_key: DataKey,
    pub data: Vec<u8>,
    pub revision: u64,
}

impl Arbitrary for EntryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), data_key(), entry_data(), revision())
            .prop_map(|(seed, data_key, data, revision)| EntryParams {
                keypair: Keypair::from_seed(&seed),
                data_key,
                data,
                revision,
            })
            .boxed()
    }
}

/// Build and sign the entry described by the parameters.
pub fn entry_from_params(params: &EntryParams) -> (RegistryEntry, Ed25519Signature) {
    let entry = RegistryEntry::new(params.data_key.clone(), params.data.clone(), params.revision);
    let signature = entry.sign(&params.keypair);
    (entry, signature)
}
