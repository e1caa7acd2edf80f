use super::*;

const SOURCE: &str = "import React from 'react';\nexport default function 주문목록() {\n  return <div>\u{c8fc}\u{bb38}</div>;\n}\n";

fn payload_of(html: &str) -> serde_json::Value {
    let start = html.find("data-key=").unwrap();
    let open = start + html[start..].find('>').unwrap() + 1;
    let close = open + html[open..].find("</script>").unwrap();
    let bytes = STANDARD.decode(&html[open..close]).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn content_key_is_stable_sha256_hex() {
    let key = content_key("abc");
    assert_eq!(key, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    assert_eq!(content_key("abc"), key);
    assert_ne!(content_key("abd"), key);
}

#[test]
fn document_carries_name_and_key() {
    let doc = build_document(SOURCE, &MountPolicy::default());
    assert_eq!(doc.component_name, "주문목록");
    assert_eq!(doc.content_key, content_key(SOURCE));
    assert!(doc.html.contains(&format!("data-key=\"{}\"", doc.content_key)));
    assert!(doc.html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn payload_round_trips_utf8_source() {
    let doc = build_document(SOURCE, &MountPolicy::default());
    let payload = payload_of(&doc.html);
    assert_eq!(payload["component"], "주문목록");
    assert!(payload["code"].as_str().unwrap().contains("function 주문목록()"));
    assert!(!payload["code"].as_str().unwrap().contains("import"));
    assert_eq!(payload["maxAttempts"], 50);
    assert_eq!(payload["intervalMs"], 100);
    assert_eq!(payload["icons"].as_array().unwrap().len(), 73);
}

#[test]
fn payload_follows_mount_policy() {
    let policy = MountPolicy { max_attempts: 5, retry_interval: std::time::Duration::from_millis(20) };
    let payload = payload_of(&build_document(SOURCE, &policy).html);
    assert_eq!(payload["maxAttempts"], 5);
    assert_eq!(payload["intervalMs"], 20);
}

#[test]
fn excerpt_is_capped_by_characters() {
    let long = "가".repeat(EXCERPT_CHARS + 50);
    let cut = excerpt(&long);
    assert_eq!(cut.chars().count(), EXCERPT_CHARS);
    assert_eq!(excerpt("short"), "short");
}

#[test]
fn document_loads_every_runtime() {
    let doc = build_document(SOURCE, &MountPolicy::default());
    for url in RUNTIME_URLS {
        assert!(doc.html.contains(url), "{url}");
    }
}

#[test]
fn sandbox_never_shares_host_origin() {
    assert!(SANDBOX_FLAGS.contains("allow-scripts"));
    assert!(!SANDBOX_FLAGS.contains("allow-same-origin"));
}
