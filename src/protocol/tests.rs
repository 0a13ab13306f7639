use std::time::Duration;

use serde_json::{Value, json};

use super::*;
use crate::message::EventMeshMessage;

fn sample_message() -> EventMeshMessage {
    EventMeshMessage::new("test-topic", "test-content")
        .with_biz_seq_no("test-biz-no")
        .with_unique_id("test-unique-id")
        .with_property("hello", "EventMesh")
}

fn metadata() -> CallMetadata {
    CallMetadata {
        client_id: "127.0.0.1-4321".to_string(),
        producer_group: "EventMeshTest-producerGroup".to_string(),
        ..CallMetadata::default()
    }
}

fn encode(message: &EventMeshMessage, code: RequestCode) -> Value {
    let bytes = encode_request(message, &metadata(), code, Duration::from_secs(3)).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_encode_request_fields() {
    let body = encode(&sample_message(), RequestCode::MsgSendAsync);
    assert_eq!(body["requestCode"], 104);
    assert_eq!(body["bizSeqNo"], "test-biz-no");
    assert_eq!(body["uniqueId"], "test-unique-id");
    assert_eq!(body["topic"], "test-topic");
    assert_eq!(body["content"], "test-content");
    assert_eq!(body["ttl"], "3000");
    assert_eq!(body["extFields"], json!({"hello": "EventMesh"}));
    assert_eq!(body["clientId"], "127.0.0.1-4321");
    assert_eq!(body["language"], "RUST");
    assert_eq!(body["version"], "V1");
    assert_eq!(body["producerGroup"], "EventMeshTest-producerGroup");
}

#[test]
fn test_encode_request_code_for_request_reply() {
    let body = encode(&sample_message(), RequestCode::MsgSendSync);
    assert_eq!(body["requestCode"], 101);
}

#[test]
fn test_encode_keeps_empty_values() {
    let message = EventMeshMessage::new("test-topic", "");
    let body = encode(&message, RequestCode::MsgSendAsync);
    assert_eq!(body["content"], "");
    assert_eq!(body["bizSeqNo"], "");
    assert_eq!(body["uniqueId"], "");
    assert_eq!(body["idc"], "");
    assert_eq!(body["extFields"], json!({}));
}

#[test]
fn test_decode_outer_success_without_message() {
    let envelope = decode_outer(br#"{"retCode":0}"#).unwrap();
    assert!(envelope.is_success());
    assert_eq!(envelope.message(), "");
}

#[test]
fn test_decode_outer_accepts_long_field_names() {
    let envelope = decode_outer(br#"{"returnCode":3,"returnMessage":"busy"}"#).unwrap();
    assert_eq!(envelope.ret_code, 3);
    assert_eq!(envelope.message(), "busy");
}

#[test]
fn test_decode_outer_null_message() {
    let envelope = decode_outer(br#"{"retCode":0,"retMsg":null,"resTime":1700000000000}"#).unwrap();
    assert_eq!(envelope.message(), "");
    assert_eq!(envelope.res_time, Some(1_700_000_000_000));
}

#[test]
fn test_decode_outer_rejects_malformed_bodies() {
    let cases: [&[u8]; 6] = [
        b"",
        b"not json",
        b"[0, \"ok\"]",
        br#"{"retMsg":"missing code"}"#,
        br#"{"retCode":"0"}"#,
        br#"{"retCode":null}"#,
    ];
    for body in cases {
        let err = decode_outer(body).unwrap_err();
        assert!(
            matches!(err, DecodeError::MalformedEnvelope(_)),
            "expected MalformedEnvelope for {:?}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn test_decode_outer_rejects_positional_arrays() {
    let cases: [&[u8]; 6] = [b"[0]", b"[7]", b"[0, \"ok\"]", b"\"ok\"", b"0", b"null"];
    for body in cases {
        let err = decode_outer(body).unwrap_err();
        match err {
            DecodeError::MalformedEnvelope(message) => {
                assert!(message.starts_with("expected a JSON object"), "{}", message)
            }
            other => panic!("expected MalformedEnvelope, got {:?}", other),
        }
    }
}

#[test]
fn test_outer_envelope_symmetry() {
    let inner = r#"{"topic":"t","body":"{\"data\":1}","properties":null}"#;
    for original in [
        ResponseEnvelope::new(0, inner),
        ResponseEnvelope::new(-1, ""),
        ResponseEnvelope::new(42, "EventMesh unavailable: \"quoted\" \n newline"),
    ] {
        let decoded = decode_outer(&original.encode().unwrap()).unwrap();
        assert_eq!(decoded.ret_code, original.ret_code);
        assert_eq!(decoded.message(), original.message());
    }
}

#[test]
fn test_decode_inner_reference_reply() {
    let outer = br#"{"retCode":0, "retMsg":"{\"topic\":\"test-topic\",\"body\":\"{\\\"data\\\":1}\",\"properties\":null}"}"#;
    let envelope = decode_outer(outer).unwrap();
    let reply = decode_inner(envelope.message()).unwrap();
    assert_eq!(reply.topic, "test-topic");
    assert_eq!(reply.body, r#"{"data":1}"#);
    assert!(reply.properties.is_empty());

    let data: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(data["data"], 1);
}

#[test]
fn test_decode_inner_properties() {
    let reply =
        decode_inner(r#"{"topic":"t","body":"b","properties":{"k1":"v1","k2":"v2"}}"#).unwrap();
    assert_eq!(reply.properties.len(), 2);
    assert_eq!(reply.properties["k2"], "v2");

    let absent = decode_inner(r#"{"body":"b"}"#).unwrap();
    assert!(absent.topic.is_empty());
    assert!(absent.properties.is_empty());
}

#[test]
fn test_decode_inner_rejects_malformed_payloads() {
    for payload in [
        "",
        "plain text reply",
        r#"{"topic":"t"}"#,
        r#"{"topic":"t","body":null}"#,
        r#"{"topic":"t","body":"b","properties":{"k":1}}"#,
    ] {
        let err = decode_inner(payload).unwrap_err();
        assert!(
            matches!(err, DecodeError::MalformedPayload(_)),
            "expected MalformedPayload for {:?}",
            payload
        );
    }
}

#[test]
fn test_decode_inner_rejects_positional_arrays() {
    for payload in [r#"["t","{\"data\":1}",null]"#, r#"["t","b"]"#, r#""body""#, "1"] {
        let err = decode_inner(payload).unwrap_err();
        match err {
            DecodeError::MalformedPayload(message) => {
                assert!(message.starts_with("expected a JSON object"), "{}", message)
            }
            other => panic!("expected MalformedPayload, got {:?}", other),
        }
    }
}

#[test]
fn test_reply_into_message_uses_reply_ids_only() {
    let reply = decode_inner(r#"{"topic":"t","body":"b","properties":null}"#).unwrap();
    let message = reply.into_message();
    assert!(message.biz_seq_no.is_empty());
    assert!(message.unique_id.is_empty());
    assert_eq!(message.content, "b");

    let reply =
        decode_inner(r#"{"topic":"t","body":"b","bizseqno":"seq-9","uniqueId":"u-9"}"#).unwrap();
    let message = reply.into_message();
    assert_eq!(message.biz_seq_no, "seq-9");
    assert_eq!(message.unique_id, "u-9");
}

#[test]
fn test_decode_error_converts_to_producer_error() {
    let err: crate::utils::ProducerError = DecodeError::MalformedPayload("x".into()).into();
    assert!(matches!(err, crate::utils::ProducerError::MalformedPayload(_)));
}

#[test]
fn test_decode_error_display() {
    assert_eq!(
        DecodeError::MalformedEnvelope("missing field `retCode`".into()).to_string(),
        "malformed envelope: missing field `retCode`"
    );
    assert_eq!(
        DecodeError::MalformedPayload("eof".into()).to_string(),
        "malformed payload: eof"
    );
}
