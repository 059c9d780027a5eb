use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use source_core::models::{
    AttachmentParams, MessageCreateParams, MessageListParams, SlotListParams, ThreadActions, ThreadCreateMessage, ThreadCreateParams, ThreadListParams, ThreadMarkParams,
    ThreadStatus, ThreadUpdateParams,
};
use source_core::{ApiError, Authentication, RequestOptions, SourceClient, SourceConfiguration, TokenOptions};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn thread_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "object": "thread",
        "id": id,
        "member": "mem_123",
        "assignee": null,
        "status": status,
        "subject": "Lab results",
        "last_message": {
            "text": "Your results are in",
            "attachments": [],
            "sender": "usr_1",
            "sent_at": "2024-03-01T12:00:00Z",
            "redacted_at": null
        },
        "created_at": "2024-03-01T12:00:00Z",
        "updated_at": "2024-03-01T12:00:00Z",
        "closed_at": null,
        "member_last_read": null,
        "last_message_at": "2024-03-01T12:00:00Z"
    })
}

fn message_json(id: &str, text: &str) -> serde_json::Value {
    json!({
        "object": "message",
        "id": id,
        "thread": "thrd_1",
        "member": "mem_123",
        "text": text,
        "attachments": [],
        "sender": "usr_1",
        "sent_at": "2024-03-02T09:30:00Z",
        "redacted_at": null
    })
}

fn api_key_client(server: &MockServer) -> SourceClient {
    let config = SourceConfiguration::new(Authentication::api_key("key_1", "s3cr3t"))
        .with_base_url(server.uri());
    SourceClient::new(config).expect("client should build")
}

#[tokio::test]
async fn test_list_threads_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/communication/threads"))
        .and(header("authorization", "Bearer key_1:s3cr3t"))
        .and(query_param("limit", "10"))
        .and(query_param("member", "mem_123"))
        .and(query_param("status[]", "awaiting_member"))
        .and(query_param("status[]", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [thread_json("thrd_1", "closed"), thread_json("thrd_2", "awaiting_member")],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = ThreadListParams {
        limit: Some(10),
        member: Some("mem_123".to_string()),
        status: vec![ThreadStatus::AwaitingMember, ThreadStatus::Closed],
        ..Default::default()
    };
    let page = api_key_client(&server).threads().list(Some(&params), None).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].status, ThreadStatus::Closed);
    assert_eq!(page.next_cursor(), Some("thrd_2"));
}

#[tokio::test]
async fn test_create_thread_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/communication/threads"))
        .and(header("idempotency-key", "create-thrd-1"))
        .and(body_json(json!({
            "member": "mem_123",
            "subject": "Lab results",
            "message": { "text": "Your results are in", "sender": "usr_1" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thrd_1", "awaiting_member")))
        .expect(1)
        .mount(&server)
        .await;

    let params = ThreadCreateParams {
        member: "mem_123".to_string(),
        subject: Some(Some("Lab results".to_string())),
        message: ThreadCreateMessage {
            sender: Some("usr_1".to_string()),
            ..ThreadCreateMessage::text("Your results are in")
        },
        ..Default::default()
    };
    let options = RequestOptions::new().idempotency_key("create-thrd-1");
    let thread = api_key_client(&server)
        .threads()
        .create(&params, Some(&options))
        .await
        .unwrap();

    assert_eq!(thread.id, "thrd_1");
    assert_eq!(thread.status, ThreadStatus::AwaitingMember);
}

#[tokio::test]
async fn test_update_and_mark_thread() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/communication/threads/thrd_1"))
        .and(body_json(json!({ "status": "closed", "subject": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thrd_1", "closed")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/communication/threads/thrd_1/mark"))
        .and(body_json(json!({ "member_last_read": "2024-03-01T12:00:00Z" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thrd_1", "closed")))
        .expect(1)
        .mount(&server)
        .await;

    let client = api_key_client(&server);
    let update = ThreadUpdateParams {
        status: Some(ThreadStatus::Closed),
        subject: Some(None),
        ..Default::default()
    };
    let thread = client.threads().update("thrd_1", Some(&update), None).await.unwrap();
    assert_eq!(thread.status, ThreadStatus::Closed);

    let mark = ThreadMarkParams {
        member_last_read: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
    };
    client.threads().mark("thrd_1", &mark, None).await.unwrap();
}

#[tokio::test]
async fn test_not_found_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/communication/threads/thrd_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "type": "invalid_request_error",
            "code": "resource_missing",
            "message": "No such thread: thrd_missing"
        })))
        .mount(&server)
        .await;

    let err = api_key_client(&server)
        .threads()
        .retrieve("thrd_missing", None)
        .await
        .unwrap_err();

    match err.downcast_ref::<ApiError>() {
        Some(ApiError::NotFound(message)) => {
            assert_eq!(message, "No such thread: thrd_missing (resource_missing)")
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(format!("{:#}", err).contains("Failed to retrieve thread thrd_missing"));
}

#[tokio::test]
async fn test_rate_limit_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/communication/messages"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let err = api_key_client(&server).messages().list(None, None).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::RateLimited)));
}

#[tokio::test]
async fn test_invalid_json_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/communication/messages/msg_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api_key_client(&server).messages().retrieve("msg_1", None).await.unwrap_err();
    assert!(matches!(err.downcast_ref::<ApiError>(), Some(ApiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_slots_with_member_token() {
    let server = MockServer::start().await;
    let client = api_key_client(&server);

    let token = client
        .token_generator()
        .generate(
            &TokenOptions::expires_in("mem_123", Duration::minutes(15))
                .unwrap()
                .with_scope("read:slots"),
        )
        .unwrap();
    let member_client = client.with_authentication(Authentication::bearer(token.clone()));

    Mock::given(method("GET"))
        .and(path("/v1/scheduling/slots"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .and(query_param("appointment_type", "intake"))
        .and(query_param("start_at", "2024-11-01T00:00:00Z"))
        .and(query_param("end_at", "2024-11-08T00:00:00Z"))
        .and(query_param("exclude_participants[]", "usr_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "slots": [{
                "object": "slot",
                "start_at": "2024-11-01T14:00:00Z",
                "end_at": "2024-11-01T14:30:00Z",
                "preferred": "usr_1",
                "available": ["usr_1"]
            }],
            "participants": ["usr_1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = SlotListParams::new(
        "intake",
        Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 11, 8, 0, 0, 0).unwrap(),
    );
    params.exclude_participants.push("usr_9".to_string());

    let response = member_client.slots().list(&params, None).await.unwrap();
    assert_eq!(response.slots.len(), 1);
    assert_eq!(response.slots[0].duration(), Duration::minutes(30));

    // member tokens cannot mint further tokens
    assert!(member_client
        .token_generator()
        .generate(&TokenOptions::expires_in("mem_123", Duration::minutes(15)).unwrap())
        .is_err());
}

#[tokio::test]
async fn test_update_thread_without_params_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/communication/threads/thrd_1"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json("thrd_1", "awaiting_member")))
        .expect(1)
        .mount(&server)
        .await;

    let thread = api_key_client(&server)
        .threads()
        .update("thrd_1", None, None)
        .await
        .unwrap();
    assert_eq!(thread.id, "thrd_1");
}

#[tokio::test]
async fn test_list_messages_filters_by_thread() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/communication/messages"))
        .and(query_param("thread", "thrd_1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [message_json("msg_2", "Second"), message_json("msg_1", "First")],
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = MessageListParams {
        thread: Some("thrd_1".to_string()),
        limit: Some(2),
        ..Default::default()
    };
    let page = api_key_client(&server).messages().list(Some(&params), None).await.unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].text, "Second");
    assert_eq!(page.next_cursor(), None);
}

#[tokio::test]
async fn test_create_message_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/communication/messages"))
        .and(header("authorization", "Bearer key_1:s3cr3t"))
        .and(body_json(json!({
            "thread": "thrd_1",
            "text": "Here is the form",
            "thread_actions": { "status": "awaiting_member" },
            "attachments": [{ "type": "file", "resource": "file_1" }],
            "sender": "usr_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_json("msg_3", "Here is the form")))
        .expect(1)
        .mount(&server)
        .await;

    let params = MessageCreateParams {
        thread: "thrd_1".to_string(),
        text: "Here is the form".to_string(),
        thread_actions: Some(ThreadActions {
            status: Some(ThreadStatus::AwaitingMember),
        }),
        attachments: vec![AttachmentParams::file("file_1")],
        sender: Some("usr_1".to_string()),
        ..Default::default()
    };
    let message = api_key_client(&server).messages().create(&params, None).await.unwrap();

    assert_eq!(message.id, "msg_3");
    assert_eq!(message.thread.id(), "thrd_1");
}
