// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical serialization and hashing of JSON events.

use courier_core::Fingerprint;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Serialize `value` with object keys sorted at every depth and no
/// insignificant whitespace.
///
/// Array order is preserved. Does not depend on whether `serde_json` was
/// built with `preserve_order`.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Serializing a str cannot fail.
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Lowercase hex SHA-256 of the canonical form of `value`.
pub fn fingerprint(value: &Value) -> Fingerprint {
    let digest = Sha256::digest(canonical_json(value).as_bytes());
    Fingerprint(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_keys_are_sorted() {
        let value = json!({"b": {"z": 1, "a": [3, {"y": null, "x": true}]}, "a": "s"});
        assert_eq!(
            canonical_json(&value),
            r#"{"a":"s","b":{"a":[3,{"x":true,"y":null}],"z":1}}"#
        );
    }

    #[test]
    fn strings_are_escaped() {
        let value = json!({"k\"ey": "line\nbreak"});
        assert_eq!(canonical_json(&value), r#"{"k\"ey":"line\nbreak"}"#);
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        let fp = fingerprint(&json!({}));
        // sha256("{}")
        assert_eq!(
            fp.as_str(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn array_order_matters() {
        assert_ne!(fingerprint(&json!([1, 2])), fingerprint(&json!([2, 1])));
    }
}
