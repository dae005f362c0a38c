//! Keywords driven against an emulated search service over HTTP.

use std::net::TcpListener;

use es_keywords::{run_keyword, ElasticSearchLibrary, KeywordError, KeywordOutput};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Service {
    server: MockServer,
    host: String,
    port: u16,
}

async fn start_service() -> Service {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let address = *server.address();
    Service {
        server,
        host: address.ip().to_string(),
        port: address.port(),
    }
}

/// A local port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn test_search_returns_service_response() {
    let service = start_service().await;
    let query = json!({"query": {"query_string": {"query": "searched value"}}});
    let response = json!({
        "took": 2,
        "timed_out": false,
        "hits": {
            "total": {"value": 1, "relation": "eq"},
            "hits": [{"_index": "books", "_id": "1", "_source": {"title": "searched value"}}]
        }
    });

    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .and(body_json(&query))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&service.server)
        .await;

    let library = ElasticSearchLibrary::new();
    let result = library
        .search(&service.host, service.port, "books", &query)
        .await
        .unwrap();

    assert_eq!(result, response);
}

#[tokio::test]
async fn test_count_with_and_without_query() {
    let service = start_service().await;
    let query = json!({"query": {"term": {"author": "tolkien"}}});

    Mock::given(method("POST"))
        .and(path("/books/_count"))
        .and(body_json(&query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 7})))
        .mount(&service.server)
        .await;
    Mock::given(path("/films/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 12,
            "_shards": {"total": 1, "successful": 1, "skipped": 0, "failed": 0}
        })))
        .mount(&service.server)
        .await;

    let library = ElasticSearchLibrary::new();
    let count = library
        .count(&service.host, service.port, "books", Some(&query))
        .await
        .unwrap();
    assert_eq!(count, 7);

    let count = library
        .count(&service.host, service.port, "films", None)
        .await
        .unwrap();
    assert_eq!(count, 12);
}

#[tokio::test]
async fn test_create_index_without_mapping_sends_no_body() {
    let service = start_service().await;
    Mock::given(method("PUT"))
        .and(path("/t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"acknowledged": true, "index": "t1"})),
        )
        .expect(1)
        .mount(&service.server)
        .await;

    ElasticSearchLibrary::new()
        .create_index(&service.host, service.port, "t1", None)
        .await
        .unwrap();

    let requests = service.server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    assert!(create.body.is_empty());
}

#[tokio::test]
async fn test_create_index_with_mapping() {
    let service = start_service().await;
    let mapping = json!({"mappings": {"properties": {"a": {"type": "long"}}}});
    Mock::given(method("PUT"))
        .and(path("/t2"))
        .and(body_json(&mapping))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(&service.server)
        .await;

    ElasticSearchLibrary::new()
        .create_index(&service.host, service.port, "t2", Some(&mapping))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_index_document_then_count() {
    let service = start_service().await;
    Mock::given(method("PUT"))
        .and(path("/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(&service.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/t1/doc/1"))
        .and(query_param("refresh", "true"))
        .and(body_json(json!({"a": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"result": "created"})))
        .expect(1)
        .mount(&service.server)
        .await;
    Mock::given(path("/t1/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .expect(1)
        .mount(&service.server)
        .await;

    let library = ElasticSearchLibrary::new();
    library
        .create_index(&service.host, service.port, "t1", None)
        .await
        .unwrap();
    library
        .index_document(&service.host, service.port, "t1", "doc", "1", &json!({"a": 1}))
        .await
        .unwrap();
    let count = library
        .count(&service.host, service.port, "t1", None)
        .await
        .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_delete_missing_index() {
    let service = start_service().await;
    Mock::given(method("DELETE"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"type": "index_not_found_exception", "reason": "no such index [missing]"},
            "status": 404
        })))
        .mount(&service.server)
        .await;

    let err = ElasticSearchLibrary::new()
        .delete_index(&service.host, service.port, "missing")
        .await
        .unwrap_err();

    assert!(matches!(err, KeywordError::DeleteIndexError(_)));
    assert!(err.to_string().contains("index_not_found_exception"));
}

#[tokio::test]
async fn test_rejected_query_is_search_error() {
    let service = start_service().await;
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"type": "parsing_exception", "reason": "unknown query [matchh]"},
            "status": 400
        })))
        .mount(&service.server)
        .await;

    let query = json!({"query": {"matchh": {}}});
    let err = ElasticSearchLibrary::new()
        .search(&service.host, service.port, "books", &query)
        .await
        .unwrap_err();

    assert!(matches!(err, KeywordError::SearchError(_)));
    let message = err.to_string();
    assert!(message.starts_with(&format!(
        "Search error on {}:{}/books for query : ",
        service.host, service.port
    )));
    assert!(message.contains("matchh"));
}

#[tokio::test]
async fn test_count_response_without_count_field() {
    let service = start_service().await;
    Mock::given(path("/books/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .mount(&service.server)
        .await;

    let err = ElasticSearchLibrary::new()
        .count(&service.host, service.port, "books", None)
        .await
        .unwrap_err();

    assert!(matches!(err, KeywordError::CountError(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_connection_error_for_every_keyword() {
    let port = closed_port();
    let library = ElasticSearchLibrary::new();
    let query = json!({"query": {"match_all": {}}});

    let errors = vec![
        library.search("127.0.0.1", port, "t1", &query).await.unwrap_err(),
        library.count("127.0.0.1", port, "t1", None).await.unwrap_err(),
        library.delete_index("127.0.0.1", port, "t1").await.unwrap_err(),
        library.create_index("127.0.0.1", port, "t1", None).await.unwrap_err(),
        library
            .index_document("127.0.0.1", port, "t1", "doc", "1", &json!({"a": 1}))
            .await
            .unwrap_err(),
    ];

    for err in errors {
        assert!(err.is_connection(), "unexpected error: {}", err);
        assert!(err
            .to_string()
            .starts_with(&format!("Connection error on 127.0.0.1:{}", port)));
    }
}

#[tokio::test]
async fn test_malformed_host_is_connection_error() {
    let err = ElasticSearchLibrary::new()
        .delete_index("bad host", 9200, "t1")
        .await
        .unwrap_err();

    assert!(err.is_connection());
}

#[tokio::test]
async fn test_run_keyword_against_service() {
    let service = start_service().await;
    Mock::given(path("/books/_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3})))
        .mount(&service.server)
        .await;

    let args: Vec<String> = vec![service.host.clone(), service.port.to_string(), "books".into()];
    let output = run_keyword(&ElasticSearchLibrary::new(), "Es Count", &args)
        .await
        .unwrap();

    assert_eq!(output, KeywordOutput::Count(3));
    assert_eq!(output.to_json(), Value::from(3));
}

#[tokio::test]
async fn test_malformed_query_on_reachable_service_is_search_error() {
    let service = start_service().await;
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {}})))
        .expect(0)
        .mount(&service.server)
        .await;

    let args: Vec<String> = vec![
        service.host.clone(),
        service.port.to_string(),
        "books".into(),
        "{\"query\": ".into(),
    ];
    let err = run_keyword(&ElasticSearchLibrary::new(), "Es Search", &args)
        .await
        .unwrap_err();

    assert!(matches!(err, KeywordError::SearchError(_)));
    assert!(err.to_string().starts_with(&format!(
        "Search error on {}:{}/books for query : {{\"query\": : ",
        service.host, service.port
    )));
    assert!(err.to_string().contains("query is not valid JSON"));
}

#[tokio::test]
async fn test_malformed_query_on_closed_port_is_connection_error() {
    let port = closed_port();
    let args: Vec<String> = vec![
        "127.0.0.1".into(),
        port.to_string(),
        "books".into(),
        "{\"query\": ".into(),
    ];

    let err = run_keyword(&ElasticSearchLibrary::new(), "Es Search", &args)
        .await
        .unwrap_err();

    assert!(err.is_connection(), "unexpected error: {}", err);
    assert!(err
        .to_string()
        .starts_with(&format!("Connection error on 127.0.0.1:{}", port)));
}
