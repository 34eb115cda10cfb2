use crate::config::{CredentialStore, resolve_api_key};

/// WHAT: The keychain value wins over the environment
/// WHY: A key saved from the menu must take effect even if the env var is set
#[test]
fn given_keychain_and_env_when_resolving_then_keychain_wins() {
    // Given: Both sources hold a key
    let keychain = Some("sk-keychain".to_string());
    let env = Some("sk-env".to_string());

    // When: Resolving
    let key = resolve_api_key(keychain, env);

    // Then: The keychain key is used
    assert_eq!(key.as_deref(), Some("sk-keychain"));
}

/// WHAT: The environment is used when the keychain has nothing
/// WHY: Users may configure the key only through ANTHROPIC_API_KEY
#[test]
fn given_only_env_when_resolving_then_env_used() {
    // Given: No keychain entry
    let env = Some("sk-env".to_string());

    // When: Resolving
    let key = resolve_api_key(None, env);

    // Then: The env key is used
    assert_eq!(key.as_deref(), Some("sk-env"));
}

/// WHAT: Empty values count as absent
/// WHY: An empty key must be refused at start like a missing one
#[test]
fn given_empty_values_when_resolving_then_falls_through() {
    // Given/When/Then: An empty keychain value falls back to the env
    assert_eq!(
        resolve_api_key(Some(String::new()), Some("sk-env".to_string())).as_deref(),
        Some("sk-env")
    );

    // Given/When/Then: Both empty resolves to nothing
    assert_eq!(resolve_api_key(Some(String::new()), Some(String::new())), None);
    assert_eq!(resolve_api_key(None, None), None);
}

/// WHAT: A saved key can be read back from the keychain
/// WHY: Verifies the real credential store integration
#[test]
#[ignore] // Requires an unlocked OS keychain - run manually with: cargo test -- --ignored
#[allow(clippy::unwrap_used)]
fn given_saved_key_when_loading_then_key_returned() {
    // Given: A credential store
    let store = CredentialStore::new();

    // When: Saving a key and loading it back
    store.save("sk-ant-test-key").unwrap();
    let key = store.load();

    // Then: The saved key is returned
    assert_eq!(key.as_deref(), Some("sk-ant-test-key"));
}
