#[cfg(test)]
mod tests {
    use crate::client::GithubClient;
    use crate::error::RemoteError;
    use crate::traits::FetchClient;
    use repofeed_core::SyncError;
    use repofeed_core::env_config::RemoteConfig;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GithubClient {
        let config = RemoteConfig {
            base_url: format!("{}/", server.uri()),
            token: token.map(ToOwned::to_owned),
            timeout_secs: 5,
            ..RemoteConfig::default()
        };
        GithubClient::new(&config).unwrap()
    }

    fn repo_json(id: i64, name: &str, stars: u64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "full_name": format!("owner/{name}"),
            "description": null,
            "html_url": format!("https://github.com/owner/{name}"),
            "stargazers_count": stars,
            "forks_count": 1,
            "language": "Rust"
        })
    }

    #[tokio::test]
    async fn test_decodes_page_and_sends_paging_params() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);
        assert_eq!(client.base_url(), server.uri());

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "tokio in:name,description"))
            .and(query_param("sort", "stars"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "30"))
            .and(header("Accept", "application/vnd.github+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 2,
                "incomplete_results": false,
                "items": [repo_json(1, "tokio", 900), repo_json(2, "mini-tokio", 12)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client.search_repos("tokio in:name,description", 2, 30).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, "tokio");
        assert_eq!(page.items[0].stars, 900);
        assert_eq!(page.items[1].full_name, "owner/mini-tokio");
    }

    #[tokio::test]
    async fn test_empty_page_is_success() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "total_count": 0, "items": [] })),
            )
            .mount(&server)
            .await;

        let page = client.search_repos("nothing", 7, 30).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_sends_bearer_token_when_configured() {
        let server = MockServer::start().await;
        let client = client_for(&server, Some("ghp_test"));

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(header("Authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        client.search_repos("q", 1, 10).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_not_retried() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.search_repos("q", 1, 30).await.unwrap_err();
        assert!(matches!(err, RemoteError::HttpStatus { code: 503, .. }));
        assert_eq!(
            SyncError::from(err),
            SyncError::RemoteRejection { status: 503, message: "Service Unavailable".to_owned() }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client.search_repos("q", 1, 30).await.unwrap_err();
        assert!(matches!(err, RemoteError::JsonParse { .. }));
        assert!(err.to_string().contains("oops"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let config = RemoteConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            timeout_secs: 5,
            ..RemoteConfig::default()
        };
        let client = GithubClient::new(&config).unwrap();

        let err = client.search_repos("q", 1, 30).await.unwrap_err();
        assert!(matches!(err, RemoteError::HttpRequest(_)));
        assert!(matches!(SyncError::from(err), SyncError::Transport(_)));
    }
}
