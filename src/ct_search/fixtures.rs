// src/ct_search/fixtures.rs
// Canned API bodies shared by the unit tests
use serde_json::{Value, json};

pub const JUNK_LINE: &str = ")]}'";

pub fn search_result(cert_hash: &str) -> Value {
    json!([
        "0a1b2c",
        "CN=test",
        "C=US, O=Let's Encrypt, CN=R3",
        1600000000000i64,
        1700000000000i64,
        cert_hash,
        2,
        1600000100000i64,
        2
    ])
}

pub fn search_body(results: Vec<Value>, next_hash: Option<&str>, page_num: u32, page_count: u32) -> String {
    let payload = json!([[
        "https.ct.cdsr",
        results,
        [["issuer-uid", "issuer-hash", "R3", 12]],
        [null, next_hash, null, page_num, page_count]
    ]]);
    format!("{}\n{}", JUNK_LINE, payload)
}

pub fn cert_body(domains: &[&str]) -> String {
    let subject = format!("CN={}", domains.first().copied().unwrap_or_default());
    let payload = json!([[
        "https.ct.chr",
        [
            "0a1b2c",
            subject,
            "C=US, O=Let's Encrypt, CN=R3",
            1600000000000i64,
            1700000000000i64,
            1,
            1,
            domains
        ],
        [["Google 'Argon2024' log", "log-hash", 1234]]
    ]]);
    format!("{}\n{}", JUNK_LINE, payload)
}

pub fn cert_response(domains: &[&str]) -> super::types::CertResponse {
    super::decoder::decode_cert(&cert_body(domains)).unwrap()
}
