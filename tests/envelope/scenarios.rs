//! Envelope behavior seen from a request handler.

use crate::common::*;
use envelope::{Family, Seed, Snapshot};
use serde_json::json;

#[test]
fn success_then_error_keeps_only_error_family() {
    let mut env = embedded_envelope();
    env.push_code(["SUCCESS"]).unwrap();
    env.push_code([2001]).unwrap();
    env.push_trace(2001, json!("row 7")).unwrap();
    env.push_trace(2000, json!("ok")).unwrap();

    env.push_code([4010]).unwrap();

    assert_eq!(env.codes(), &[4000, 4010]);
    assert!(env.codes().iter().all(|c| Family::Error.contains(*c)));
    assert!(env.trace().is_empty());
    assert!(env.has_error());
}

#[test]
fn has_code_does_not_stop_at_first_miss() {
    let mut env = embedded_envelope();
    env.push_code([2002]).unwrap();
    // 2000 marker plus 2002
    assert_eq!(env.codes(), &[2000, 2002]);
    assert!(env.has_code([2001, 2002]).unwrap());
}

#[test]
fn push_data_accumulates_by_shape() {
    let mut list = embedded_envelope();
    list.push_data(json!([1, 2])).unwrap();
    list.push_data(json!([3])).unwrap();
    assert_eq!(list.result().to_json()["data"], json!([1, 2, 3]));

    let mut map = embedded_envelope();
    map.push_data(json!({"a": 1})).unwrap();
    map.push_data(json!({"b": 2})).unwrap();
    assert_eq!(map.result().to_json()["data"], json!({"a": 1, "b": 2}));
    map.push_data(json!({"b": 3})).unwrap();
    assert_eq!(map.result().to_json()["data"], json!({"a": 1, "b": 3}));
}

#[test]
fn delete_code_twice_changes_nothing() {
    let mut env = embedded_envelope();
    env.push_code([4010, 4030]).unwrap();

    env.delete_code([4030]).unwrap();
    let once = env.result().status.clone();
    env.delete_code([4030]).unwrap();
    env.delete_code([4040]).unwrap();

    assert_eq!(env.result().status, once);
}

#[test]
fn reset_snapshot_has_only_status_and_timestamp() {
    let mut env = embedded_envelope();
    env.push_code([2001]).unwrap();
    env.push_data(json!({"id": 1})).unwrap();
    env.push_trace(2001, json!("x")).unwrap();

    env.reset();

    let body = env.result().to_json();
    let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(body["status"], json!([]));
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn snapshot_tracks_every_mutation() {
    let mut env = embedded_envelope();
    env.push_code([2001]).unwrap();
    assert_eq!(env.result().status, vec![2000, 2001]);

    env.push_data(json!([1])).unwrap();
    assert!(env.result().data.is_some());

    env.delete_data();
    assert!(env.result().data.is_none());

    env.push_trace(2001, json!("t")).unwrap();
    assert!(env.result().trace.is_some());

    env.delete_code([2001]).unwrap();
    assert_eq!(env.result().status, vec![2000]);
    assert!(env.result().trace.is_none());
}

#[test]
fn snapshot_survives_the_wire() {
    let mut env = embedded_envelope();
    env.push_code(["NOT_FOUND"]).unwrap();
    env.push_data(json!({"order": 12})).unwrap();
    env.push_trace("NOT_FOUND", json!({"looked_in": "orders"})).unwrap();

    let body = serde_json::to_string(&env).unwrap();
    let received: Snapshot = serde_json::from_str(&body).unwrap();
    assert_eq!(&received, env.result());

    let mut downstream = embedded_envelope();
    downstream.mix(received).unwrap();
    assert_eq!(downstream.codes(), env.codes());
    assert_eq!(downstream.trace(), env.trace());
}

#[test]
fn handler_combines_partial_results() {
    let shop = TestDictionary::shop();

    let mut lookup = shop.envelope();
    lookup.push_code(["ORDER_PLACED"]).unwrap();
    lookup.push_data(json!({"order": 12})).unwrap();

    let mut update = shop.envelope();
    update.push_code(["ORDER_UPDATED"]).unwrap();
    update.push_data(json!({"status": "paid"})).unwrap();

    let mut response = shop.envelope();
    response.mix(&lookup).unwrap();
    response.mix(&update).unwrap();

    assert_eq!(response.codes(), &[2000, 2001, 2002]);
    assert_eq!(
        response.result().to_json()["data"],
        json!({"order": 12, "status": "paid"})
    );

    let mut denied = shop.envelope();
    denied.push_code(["UNAUTHORIZED"]).unwrap();
    response.replace_with(&denied).unwrap();
    assert_eq!(response.codes(), &[4000, 4010]);
    assert!(response.data().is_none());
}

#[test]
fn seeded_construction_from_json() {
    let shop = TestDictionary::shop();
    let seed: Seed = serde_json::from_value(json!({
        "status": ["ORDER_NOT_FOUND"],
        "trace": {"4041": {"order": 99}}
    }))
    .unwrap();

    let env = envelope::ResponseEnvelope::from_seed_with_dictionary(seed, shop.dictionary.clone())
        .unwrap();
    assert_eq!(env.codes(), &[4000, 4041]);
    assert_eq!(env.trace()[&4041], json!({"order": 99}));
    assert_eq!(shop.dictionary.title_of(env.codes()[1]).unwrap(), "Order not found");
}

#[test]
fn global_envelope_understands_embedded_names() {
    let mut env = envelope::ResponseEnvelope::new();
    env.push_code(["CREATED"]).unwrap();
    assert_eq!(env.codes(), &[2000, 2001]);
}
