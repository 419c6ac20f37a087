// URL builder tests against the public API

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use rstest::rstest;
use sha2::Sha256;
use std::sync::Arc;
use std::thread;

use imgproxy_url::{ProxyConfig, ProxyOption, ProxyParams, UrlBuilder};

const BASE: &str = "https://img.onelitefeather.net";
const KEY_B64: &str = "c2VjcmV0";
const SALT_B64: &str = "aGVsbG8=";

fn signed() -> UrlBuilder {
    UrlBuilder::new(&ProxyConfig::new(BASE).with_signing(KEY_B64, SALT_B64)).unwrap()
}

fn decode_segment(segment: &str) -> String {
    String::from_utf8(URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
}

#[test]
fn test_roundtrip_decode_recovers_segments_in_order() {
    let params = ProxyParams::new()
        .with(ProxyOption::Resize, "fill")
        .with(ProxyOption::Width, 640)
        .with(ProxyOption::Height, 360)
        .with(ProxyOption::Gravity, "sm")
        .with(ProxyOption::Format, "webp");

    let url = signed().build_url("blog/2024/cover.png", &params, false);
    let token = url.strip_prefix(&format!("{}/", BASE)).unwrap();
    let raw = decode_segment(token);

    let parts: Vec<&str> = raw.trim_start_matches('/').split('/').collect();
    assert_eq!(
        parts,
        vec!["rs:fill", "w:640", "h:360", "g:sm", "f:webp", "blog", "2024", "cover.png"]
    );
}

#[test]
fn test_determinism() {
    let params = ProxyParams::new().with(ProxyOption::Width, 100);
    let a = signed().build_url("cat.jpg", &params, true);
    let b = signed().build_url("cat.jpg", &params, true);
    assert_eq!(a, b);
}

#[test]
fn test_signing_toggle_adds_exactly_one_segment() {
    let builder = signed();
    let params = ProxyParams::new().with(ProxyOption::Quality, 80);

    let unsigned = builder.build_url("cat.jpg", &params, false);
    let signed = builder.build_url("cat.jpg", &params, true);

    let unsigned_rest = unsigned.strip_prefix(&format!("{}/", BASE)).unwrap();
    let signed_rest = signed.strip_prefix(&format!("{}/", BASE)).unwrap();
    assert_eq!(unsigned_rest.split('/').count(), 1);
    assert_eq!(signed_rest.split('/').count(), 2);

    let (_, path) = signed_rest.split_once('/').unwrap();
    assert_eq!(path, unsigned_rest);
}

#[test]
fn test_signature_matches_independent_hmac() {
    let params = ProxyParams::new()
        .with(ProxyOption::Width, 300)
        .with(ProxyOption::StripMetadata, true);
    let url = signed().build_url("team/avatar.png", &params, true);
    let rest = url.strip_prefix(&format!("{}/", BASE)).unwrap();
    let (signature, path) = rest.split_once('/').unwrap();

    let mut mac = Hmac::<Sha256>::new_from_slice(b"secret").unwrap();
    mac.update(b"hello");
    mac.update(path.as_bytes());
    let expected = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    assert_eq!(signature, expected);
}

#[rstest]
#[case(None, None)]
#[case(Some(KEY_B64), None)]
#[case(None, Some(SALT_B64))]
#[case(Some(""), Some(SALT_B64))]
fn test_missing_secrets_degrade_to_unsigned(#[case] key: Option<&str>, #[case] salt: Option<&str>) {
    let config = ProxyConfig {
        base_url: BASE.to_string(),
        key: key.map(str::to_string),
        salt: salt.map(str::to_string),
    };
    let builder = UrlBuilder::new(&config).unwrap();
    let params = ProxyParams::new().with(ProxyOption::Width, 100);

    assert_eq!(
        builder.build_url("cat.jpg", &params, true),
        builder.build_url("cat.jpg", &params, false)
    );
    assert_eq!(builder.metrics().unsigned_fallbacks(), 1);
}

#[test]
fn test_key_order_is_preserved() {
    let builder = signed();
    let a = ProxyParams::new()
        .with(ProxyOption::Width, 100)
        .with(ProxyOption::Height, 50);
    let b = ProxyParams::new()
        .with(ProxyOption::Height, 50)
        .with(ProxyOption::Width, 100);
    assert_ne!(
        builder.build_url("cat.jpg", &a, false),
        builder.build_url("cat.jpg", &b, false)
    );

    let params = ProxyParams::new()
        .with(ProxyOption::Width, 100)
        .with(ProxyOption::Quality, 80);
    assert_eq!(
        builder.build_url("cat.jpg", &params, false),
        format!("{}/{}", BASE, URL_SAFE_NO_PAD.encode("/w:100/q:80/cat.jpg"))
    );
}

#[test]
fn test_empty_parameter_set() {
    let url = signed().build_url("cat.jpg", &ProxyParams::new(), false);
    assert_eq!(url, format!("{}/{}", BASE, URL_SAFE_NO_PAD.encode("/cat.jpg")));
}

#[test]
fn test_loosely_typed_params_reject_unknown_keys() {
    let result = ProxyParams::from_pairs([("width", "100"), ("opacity", "0.5")]);
    assert!(result.is_err());
}

#[test]
fn test_verify_url_roundtrip() {
    let builder = signed();
    let params = ProxyParams::new()
        .with(ProxyOption::Blur, 2.5)
        .with(ProxyOption::Background, "ffffff");
    let url = builder.build_url("https://cdn.example.com/a/b.jpg", &params, true);

    let decoded = builder.verify_url(&url).unwrap();
    assert_eq!(decoded.image, "https://cdn.example.com/a/b.jpg");
    assert_eq!(decoded.params().len(), 2);
    assert_eq!(decoded.segments[0], (ProxyOption::Blur, "2.5".to_string()));
}

#[test]
fn test_concurrent_callers_share_one_builder() {
    let builder = Arc::new(signed());
    let expected = builder.url("cat.jpg");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let builder = Arc::clone(&builder);
            thread::spawn(move || builder.url("cat.jpg"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(builder.metrics().signed_urls(), 9);
}
