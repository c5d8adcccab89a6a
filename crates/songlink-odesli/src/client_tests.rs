// SPDX-License-Identifier: GPL-3.0-or-later

#[cfg(test)]
mod tests {
    use crate::{BackoffPolicy, OdesliClient, OdesliError};
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SOURCE_URL: &str = "https://music.apple.com/us/album/ok-computer/1097861387";
    const PAGE_URL: &str = "https://album.link/i/1097861387";

    fn client_with(server: &MockServer, backoff: BackoffPolicy) -> OdesliClient {
        OdesliClient::builder()
            .base_url(format!("{}/links", server.uri()))
            .backoff(backoff)
            .build()
            .unwrap()
    }

    fn fast_backoff() -> BackoffPolicy {
        BackoffPolicy::new(5, Duration::from_millis(20), 1.8)
    }

    fn page_body() -> serde_json::Value {
        serde_json::json!({
            "entityUniqueId": "ITUNES_ALBUM::1097861387",
            "pageUrl": PAGE_URL,
            "linksByPlatform": {}
        })
    }

    #[tokio::test]
    async fn test_resolve_returns_page_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .and(query_param("url", SOURCE_URL))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, fast_backoff());
        let link = client.resolve(SOURCE_URL).await.unwrap();

        assert_eq!(link.unwrap().as_str(), PAGE_URL);
    }

    #[tokio::test]
    async fn test_transient_statuses_are_retried_with_backoff() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, fast_backoff());
        let started = Instant::now();
        let link = client.resolve(SOURCE_URL).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(link.unwrap().as_str(), PAGE_URL);
        // 20ms + 36ms of backoff before the third request
        assert!(elapsed >= Duration::from_millis(55), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(5), "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_default_backoff_waits_before_each_retry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(2)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, BackoffPolicy::default());
        let started = Instant::now();
        let link = client.resolve(SOURCE_URL).await.unwrap();
        let elapsed = started.elapsed();

        assert!(link.is_some());
        // 0.8s + 1.44s
        assert!(elapsed >= Duration::from_millis(2230), "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_non_transient_status_fails_immediately() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, fast_backoff());
        let result = client.resolve(SOURCE_URL).await;

        match result {
            Err(OdesliError::ApiError { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exhausted_attempts_resolve_to_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(502))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = client_with(
            &mock_server,
            BackoffPolicy::new(3, Duration::from_millis(5), 1.8),
        );
        let link = client.resolve(SOURCE_URL).await.unwrap();

        assert!(link.is_none());
    }

    #[tokio::test]
    async fn test_missing_page_url_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"entityUniqueId": "x", "pageUrl": ""})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, fast_backoff());
        assert!(client.resolve(SOURCE_URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_optional_parameters_are_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .and(query_param("url", SOURCE_URL))
            .and(query_param("userCountry", "GB"))
            .and(query_param("key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OdesliClient::builder()
            .base_url(format!("{}/links", mock_server.uri()))
            .api_key(Some("secret".to_string()))
            .user_country(Some("GB".to_string()))
            .build()
            .unwrap();

        assert!(client.resolve(SOURCE_URL).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/links"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{"))
            .mount(&mock_server)
            .await;

        let client = client_with(&mock_server, fast_backoff());
        let result = client.resolve(SOURCE_URL).await;

        assert!(matches!(result, Err(OdesliError::InvalidResponse(_))));
    }
}
