//! End-to-end registry and SkyDB behaviour against an in-memory portal.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use skynet::core::encoding::encode_base64_url;
use skynet::core::{
    decode_skylink, format_skylink, hash_data_key, next_revision, CoreError, MAX_REVISION,
    RAW_SKYLINK_SIZE,
};
use skynet::{
    CallOptions, ClientConfig, DataKey, JsonData, Keypair, MemoryPortal, RegistryEntry,
    SkynetClient, SkynetError,
};

fn client() -> SkynetClient<MemoryPortal> {
    SkynetClient::new(MemoryPortal::new(), ClientConfig::default())
}

fn object(value: Value) -> JsonData {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

fn opts() -> CallOptions {
    CallOptions::new()
}

proptest! {
    #[test]
    fn prop_skylink_string_roundtrip(bytes in prop::collection::vec(any::<u8>(), RAW_SKYLINK_SIZE)) {
        // Only structurally valid skylinks decode, so start from one.
        let mut raw = bytes.clone();
        raw[0] = 0b0000_0001;
        raw[1] = 0;
        let formatted = format_skylink(&encode_base64_url(&raw));
        let decoded = decode_skylink(&formatted).unwrap();
        prop_assert_eq!(&decoded.as_bytes()[..], &raw[..]);
    }

    #[test]
    fn prop_next_revision(revision in 0u64..MAX_REVISION) {
        prop_assert_eq!(next_revision(Some(revision)).unwrap(), revision + 1);
    }

    #[test]
    fn prop_tampering_breaks_signature(
        data in prop::collection::vec(any::<u8>(), 1..=70),
        revision in 0u64..u64::MAX,
        flip in any::<prop::sample::Index>(),
    ) {
        let keypair = Keypair::from_seed(&[3u8; 32]);
        let entry = RegistryEntry::new(DataKey::plain("k"), data.clone(), revision);
        let signature = entry.sign(&keypair);
        let pk = keypair.public_key();
        prop_assert!(pk.verify(entry.hash().as_bytes(), &signature).is_ok());

        let mut bad_data = data.clone();
        bad_data[flip.index(data.len())] ^= 0x01;
        let bad = RegistryEntry::new(DataKey::plain("k"), bad_data, revision);
        prop_assert!(pk.verify(bad.hash().as_bytes(), &signature).is_err());

        let bumped = RegistryEntry::new(DataKey::plain("k"), data, revision + 1);
        prop_assert!(pk.verify(bumped.hash().as_bytes(), &signature).is_err());
    }
}

#[test]
fn test_revision_edges() {
    assert_eq!(next_revision(None).unwrap(), 0);
    assert!(matches!(
        next_revision(Some(MAX_REVISION)),
        Err(CoreError::RevisionExhausted { .. })
    ));
}

#[tokio::test]
async fn test_set_then_get_json() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    client
        .set_json(&keypair, "doc", object(json!({ "a": 0 })), &opts())
        .await
        .unwrap();
    let before = client.get_entry(&pk, "doc", &opts()).await.unwrap().revision();

    let written = client
        .set_json(&keypair, "doc", object(json!({ "a": 1 })), &opts())
        .await
        .unwrap();

    let read = client.get_json(&pk, "doc", &opts()).await.unwrap();
    assert_eq!(read.data, Some(object(json!({ "a": 1 }))));
    assert!(read.data_link.is_some());
    assert_eq!(read.data_link, written.data_link);

    let after = client.get_entry(&pk, "doc", &opts()).await.unwrap().revision();
    assert_eq!(after, before.map(|r| r + 1));
}

#[tokio::test]
async fn test_first_write_uses_revision_zero() {
    let client = client();
    let keypair = Keypair::generate();

    client
        .set_json(&keypair, "fresh", object(json!({})), &opts())
        .await
        .unwrap();
    let signed = client
        .get_entry(&keypair.public_key(), "fresh", &opts())
        .await
        .unwrap();
    assert_eq!(signed.revision(), Some(0));
}

#[tokio::test]
async fn test_delete_json() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    client
        .set_json(&keypair, "doc", object(json!({ "a": 1 })), &opts())
        .await
        .unwrap();
    let uploads = client.portal().stats().uploads;

    client.delete_json(&keypair, "doc", &opts()).await.unwrap();
    assert_eq!(client.portal().stats().uploads, uploads);

    let read = client.get_json(&pk, "doc", &opts()).await.unwrap();
    assert_eq!(read.data, None);
    assert_eq!(read.data_link, None);
}

#[tokio::test]
async fn test_cached_data_link_skips_download() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    let written = client
        .set_json(&keypair, "doc", object(json!({ "a": 1 })), &opts())
        .await
        .unwrap();
    let link = written.data_link.unwrap();
    let downloads = client.portal().stats().downloads;

    let read = client
        .get_json(&pk, "doc", &opts().cached_data_link(link.clone()))
        .await
        .unwrap();
    assert_eq!(read.data, None);
    assert_eq!(read.data_link, Some(link.clone()));
    assert_eq!(client.portal().stats().downloads, downloads);

    // The bare form of the same link matches too.
    let bare = link.trim_start_matches("sia:").to_string();
    let read = client
        .get_json(&pk, "doc", &opts().cached_data_link(bare))
        .await
        .unwrap();
    assert_eq!(read.data, None);
    assert_eq!(client.portal().stats().downloads, downloads);

    // A stale link downloads.
    let stale = client.portal().put_blob(Bytes::from_static(b"{}")).unwrap();
    let read = client
        .get_json(&pk, "doc", &opts().cached_data_link(stale.to_uri()))
        .await
        .unwrap();
    assert_eq!(read.data, Some(object(json!({ "a": 1 }))));
    assert_eq!(client.portal().stats().downloads, downloads + 1);
}

#[tokio::test]
async fn test_cached_data_link_matches_any_encoding() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    let written = client
        .set_json(&keypair, "doc", object(json!({ "a": 1 })), &opts())
        .await
        .unwrap();
    let link = written.data_link.unwrap();
    let skylink = decode_skylink(&link).unwrap();
    let downloads = client.portal().stats().downloads;

    let forms = [
        skylink.to_base32(),
        format!("{}==", skylink.to_base64()),
        format!("sia://{}", skylink.to_base64()),
    ];
    for form in forms {
        let read = client
            .get_json(&pk, "doc", &opts().cached_data_link(form.clone()))
            .await
            .unwrap();
        assert_eq!(read.data, None, "{form}");
        assert_eq!(read.data_link, Some(link.clone()), "{form}");
    }
    assert_eq!(client.portal().stats().downloads, downloads);

    // An undecodable hint is ignored and the blob is fetched.
    let read = client
        .get_json(&pk, "doc", &opts().cached_data_link("not a link"))
        .await
        .unwrap();
    assert_eq!(read.data, Some(object(json!({ "a": 1 }))));
    assert_eq!(client.portal().stats().downloads, downloads + 1);
}

#[tokio::test]
async fn test_legacy_document_returned_unmodified() {
    let client = client();
    let keypair = Keypair::generate();
    let legacy = json!({ "title": "old", "_v": 1 });
    let skylink = client
        .portal()
        .put_blob(serde_json::to_vec(&legacy).unwrap())
        .unwrap();

    client
        .set_data_link(&keypair, "legacy", &skylink.to_uri(), &opts())
        .await
        .unwrap();

    let read = client
        .get_json(&keypair.public_key(), "legacy", &opts())
        .await
        .unwrap();
    assert_eq!(read.data, Some(object(legacy)));
}

#[tokio::test]
async fn test_not_found_differs_from_deleted() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    let never = client.get_entry(&pk, "never", &opts()).await.unwrap();
    assert!(never.entry.is_none());

    client
        .set_json(&keypair, "gone", object(json!({ "a": 1 })), &opts())
        .await
        .unwrap();
    client.delete_json(&keypair, "gone", &opts()).await.unwrap();

    let deleted = client.get_entry(&pk, "gone", &opts()).await.unwrap();
    let entry = deleted.entry.unwrap();
    assert_eq!(&entry.data[..], &[0u8; RAW_SKYLINK_SIZE][..]);

    let read = client.get_json(&pk, "gone", &opts()).await.unwrap();
    assert_eq!(read.data, None);
}

#[tokio::test]
async fn test_hashed_data_key_addresses_same_slot() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();
    let hashed = CallOptions::new().hashed_data_key_hex(true);
    let hex = hash_data_key("doc").to_hex();

    client
        .set_json(&keypair, "doc", object(json!({ "v": 1 })), &opts())
        .await
        .unwrap();
    client
        .set_json(&keypair, &hex, object(json!({ "v": 2 })), &hashed)
        .await
        .unwrap();

    let read = client.get_json(&pk, "doc", &opts()).await.unwrap();
    assert_eq!(read.data, Some(object(json!({ "v": 2 }))));
    assert_eq!(
        client.get_entry(&pk, &hex, &hashed).await.unwrap().revision(),
        Some(1)
    );
}

#[tokio::test]
async fn test_exhausted_revision() {
    let client = client();
    let keypair = Keypair::generate();
    let entry = RegistryEntry::new(DataKey::plain("max"), Bytes::from_static(b"x"), MAX_REVISION);
    client.set_entry(&keypair, &entry).await.unwrap();

    let result = client
        .set_json(&keypair, "max", object(json!({})), &opts())
        .await;
    assert!(matches!(
        result,
        Err(SkynetError::RevisionExhausted { revision: MAX_REVISION })
    ));
    assert!(matches!(
        client.delete_json(&keypair, "max", &opts()).await,
        Err(SkynetError::RevisionExhausted { .. })
    ));
}

#[tokio::test]
async fn test_non_skylink_entry_data_is_validation_error() {
    // The entry is signed and verifies, so a malformed payload length is a
    // validation error rather than an integrity failure.
    let client = client();
    let keypair = Keypair::generate();
    client
        .set_entry_data(&keypair, "raw", b"not a skylink", &opts())
        .await
        .unwrap();

    let result = client.get_json(&keypair.public_key(), "raw", &opts()).await;
    assert!(matches!(result, Err(SkynetError::Validation(_))));
}

#[tokio::test]
async fn test_concurrent_writers_resolved_by_portal() {
    let client = client();
    let keypair = Keypair::generate();
    let pk = keypair.public_key();

    // Both writers read revision 0 before either posts; one is rejected.
    client
        .set_json(&keypair, "race", object(json!({ "n": 0 })), &opts())
        .await
        .unwrap();
    let resolved = client.resolve("race", &opts()).unwrap();
    let (a, _) = client
        .prepare_entry_for_json(&pk, &object(json!({ "n": 1 })), &resolved)
        .await
        .unwrap();
    let (b, _) = client
        .prepare_entry_for_json(&pk, &object(json!({ "n": 2 })), &resolved)
        .await
        .unwrap();
    assert_eq!(a.revision, b.revision);

    client.set_entry(&keypair, &b).await.unwrap();
    assert!(matches!(
        client.set_entry(&keypair, &a).await,
        Err(SkynetError::Transport(_))
    ));

    let read = client.get_json(&pk, "race", &opts()).await.unwrap();
    assert_eq!(read.data, Some(object(json!({ "n": 2 }))));
}
