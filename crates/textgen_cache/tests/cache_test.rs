//! Tests for the cache gateway and its stores.

use serde_json::json;
use std::sync::Arc;
use textgen_cache::{CacheGateway, CacheStore, DiskStore, InMemoryStore, KeyMaterial};
use textgen_core::{
    Conversation, GenerationConfig, GenerationParams, GenerationResponse, Message, ModelLimits,
    ProviderId, RoleTable, SystemPlacement, Usage, normalize,
};
use textgen_error::{CacheStoreError, CacheStoreErrorKind};

const GEMINI_ROLES: RoleTable = RoleTable {
    user: "user",
    assistant: "model",
    system: SystemPlacement::FoldIntoFirstUser,
    merge_consecutive: false,
    leading_user: false,
};

fn conversation() -> Conversation {
    normalize(
        &[
            Message::system("Answer tersely."),
            Message::user("What is the capital of France?"),
        ],
        &GEMINI_ROLES,
    )
}

fn params(temperature: f32) -> GenerationParams {
    let config = GenerationConfig::default().with_temperature(temperature);
    GenerationParams::resolve(&config, "gemini-1.5-flash", &ModelLimits::default(), 30720)
}

fn response(params: &GenerationParams, text: &str) -> GenerationResponse {
    GenerationResponse::builder()
        .text(vec![Message::assistant(text)])
        .config(params.clone())
        .usage(Usage::new(7))
        .raw_response(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
        .build()
        .expect("Valid response")
}

struct UnavailableStore;

impl CacheStore for UnavailableStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, CacheStoreError> {
        Err(CacheStoreError::new(CacheStoreErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }

    fn put(&self, _key: &[u8], _value: &[u8]) -> Result<(), CacheStoreError> {
        Err(CacheStoreError::new(CacheStoreErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }
}

#[test]
fn test_store_then_lookup_round_trips() {
    let gateway = CacheGateway::new(InMemoryStore::new());
    let conversation = conversation();
    let params = params(0.4);
    let material = KeyMaterial::new(ProviderId::Gemini, &conversation, &params);
    let stored = response(&params, "Paris");

    assert!(gateway.lookup(&material).is_none());
    gateway.store(&material, &stored).expect("Store succeeds");

    assert_eq!(gateway.lookup(&material), Some(stored));
}

#[test]
fn test_identical_requests_share_a_key() {
    let gateway = CacheGateway::new(InMemoryStore::new());
    let (first_conv, second_conv) = (conversation(), conversation());
    let (first_params, second_params) = (params(0.4), params(0.4));

    let first = gateway
        .key(&KeyMaterial::new(ProviderId::Gemini, &first_conv, &first_params))
        .unwrap();
    let second = gateway
        .key(&KeyMaterial::new(ProviderId::Gemini, &second_conv, &second_params))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_parameter_change_changes_key() {
    let gateway = CacheGateway::new(InMemoryStore::new());
    let conversation = conversation();
    let (cold, warm) = (params(0.0), params(0.9));

    let cold_key = gateway
        .key(&KeyMaterial::new(ProviderId::Gemini, &conversation, &cold))
        .unwrap();
    let warm_key = gateway
        .key(&KeyMaterial::new(ProviderId::Gemini, &conversation, &warm))
        .unwrap();
    let other_provider = gateway
        .key(&KeyMaterial::new(ProviderId::Palm, &conversation, &cold))
        .unwrap();

    assert_ne!(cold_key, warm_key);
    assert_ne!(cold_key, other_provider);
}

#[test]
fn test_unavailable_store_degrades_to_miss() {
    let gateway = CacheGateway::new(UnavailableStore);
    let conversation = conversation();
    let params = params(0.4);
    let material = KeyMaterial::new(ProviderId::Gemini, &conversation, &params);

    assert!(gateway.lookup(&material).is_none());

    let err = gateway
        .store(&material, &response(&params, "Paris"))
        .unwrap_err();
    assert!(matches!(err.kind(), CacheStoreErrorKind::Unavailable(_)));
}

#[test]
fn test_undecodable_entry_is_a_miss() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = CacheGateway::shared(store.clone());
    let conversation = conversation();
    let params = params(0.4);
    let material = KeyMaterial::new(ProviderId::Gemini, &conversation, &params);

    let key = gateway.key(&material).unwrap();
    store.put(key.as_bytes(), b"not json").unwrap();

    assert!(gateway.lookup(&material).is_none());
}

#[test]
fn test_update_existing_key() {
    let store = Arc::new(InMemoryStore::new());
    let gateway = CacheGateway::shared(store.clone());
    let conversation = conversation();
    let params = params(0.4);
    let material = KeyMaterial::new(ProviderId::Gemini, &conversation, &params);

    gateway.store(&material, &response(&params, "Paris")).unwrap();
    gateway.store(&material, &response(&params, "Paris, France")).unwrap();

    assert_eq!(store.len().unwrap(), 1);
    let cached = gateway.lookup(&material).unwrap();
    assert_eq!(cached.first_text(), Some("Paris, France"));
}

#[test]
fn test_disk_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let conversation = conversation();
    let params = params(0.4);
    let material = KeyMaterial::new(ProviderId::Gemini, &conversation, &params);
    let stored = response(&params, "Paris");

    {
        let gateway = CacheGateway::new(DiskStore::open(dir.path()).unwrap());
        gateway.store(&material, &stored).unwrap();
    }

    let reopened = CacheGateway::new(DiskStore::open(dir.path()).unwrap());
    assert_eq!(reopened.lookup(&material), Some(stored));
}

#[test]
fn test_disk_store_miss_and_nested_dir() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let store = DiskStore::open(dir.path().join("textgen").join("gemini")).unwrap();

    assert!(store.dir().exists());
    assert_eq!(store.get(b"missing").unwrap(), None);

    store.put(b"k", b"v").unwrap();
    assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_disk_store_concurrent_writes_to_one_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskStore::open(dir.path()).unwrap();
    let first = vec![b'a'; 64 * 1024];
    let second = vec![b'b'; 64 * 1024];

    std::thread::scope(|scope| {
        for value in [&first, &second] {
            let store = &store;
            scope.spawn(move || {
                for _ in 0..200 {
                    store.put(b"shared", value).unwrap();
                }
            });
        }
    });

    let stored = store.get(b"shared").unwrap().expect("Entry written");
    assert!(stored == first || stored == second);
    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}
