//! Fixed envelopes returned when a remote call fails.

use serde_json::json;

use super::{Endpoint, Envelope};

/// Build the fallback envelope for `endpoint`, carrying `description`.
///
/// Each shape is fixed per endpoint and contains no other fields.
pub fn envelope(endpoint: Endpoint, description: &str) -> Envelope {
    let mut map = Envelope::new();
    match endpoint {
        Endpoint::Health | Endpoint::Process => {
            map.insert("status".to_string(), json!("error"));
            map.insert("message".to_string(), json!(description));
        }
        Endpoint::Transactions => {
            map.insert("transactions".to_string(), json!([]));
            map.insert("error".to_string(), json!(description));
        }
        Endpoint::DatabaseTest => {
            map.insert("connection_test".to_string(), json!(false));
            map.insert("error".to_string(), json!(description));
        }
        Endpoint::Environment => {
            map.insert("error".to_string(), json!(description));
        }
    }
    map
}
