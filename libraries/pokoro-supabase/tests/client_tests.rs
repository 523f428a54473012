//! Tests for the Supabase backend against a mock PostgREST server.

use pokoro_core::{FavoritesStore, PokoroError, RawTrackId, TrackCatalog, TrackId, UserId};
use pokoro_supabase::{SupabaseClient, SupabaseConfig, SupabaseError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "anon-test-key";

async fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(SupabaseConfig::new(server.uri(), ANON_KEY)).unwrap()
}

fn guest() -> UserId {
    UserId::guest("18c2f1a0b3")
}

// =============================================================================
// Catalog
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_fetch_tracks_sends_keys_and_parses_rows() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tracks"))
            .and(query_param("select", "*"))
            .and(header("apikey", ANON_KEY))
            .and(header("authorization", format!("Bearer {}", ANON_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "title": "Night Drive",
                    "artist": "Kora",
                    "audio_url": "https://cdn.example.com/1.mp3",
                    "cover_url": "https://cdn.example.com/1.jpg",
                    "created_at": "2024-03-01T12:00:00Z"
                },
                { "id": "b7e2", "title": null }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let tracks = client.fetch_tracks().await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, RawTrackId::Number(1));
        assert_eq!(tracks[0].title.as_deref(), Some("Night Drive"));
        assert_eq!(tracks[1].id, RawTrackId::Text("b7e2".to_string()));
        assert!(tracks[1].audio_url.is_none());
    }

    #[tokio::test]
    async fn test_malformed_row_is_skipped_not_fatal() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "title": "Good", "audio_url": "https://cdn.example.com/1.mp3" },
                { "id": 2, "title": 42, "artist": { "name": "Kora" } },
                { "id": null, "title": "No key" },
                { "id": 3, "title": "Also good" }
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let tracks = client.list_tracks().await.unwrap();

        let ids: Vec<RawTrackId> = tracks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                RawTrackId::Number(1),
                RawTrackId::Number(2),
                RawTrackId::Number(3)
            ]
        );
        assert_eq!(tracks[1].title.as_deref(), Some("42"));
        assert!(tracks[1].artist.is_none());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_catalog_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tracks"))
            .respond_with(ResponseTemplate::new(500).set_body_string("relation does not exist"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;

        match client.fetch_tracks().await.unwrap_err() {
            SupabaseError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("relation"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }

        match client.list_tracks().await.unwrap_err() {
            PokoroError::Catalog(msg) => assert!(msg.contains("500")),
            e => panic!("Expected Catalog error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(matches!(
            client.fetch_tracks().await,
            Err(SupabaseError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_rejected_key_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/tracks"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Invalid API key"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        match client.fetch_tracks().await.unwrap_err() {
            SupabaseError::Unauthorized(msg) => assert!(msg.contains("Invalid API key")),
            e => panic!("Expected Unauthorized, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let client =
            SupabaseClient::new(SupabaseConfig::new("http://127.0.0.1:9", ANON_KEY)).unwrap();

        match client.list_tracks().await.unwrap_err() {
            PokoroError::Network(_) | PokoroError::Catalog(_) => {}
            e => panic!("Expected Network or Catalog error, got: {:?}", e),
        }
    }
}

// =============================================================================
// Favorites
// =============================================================================

mod favorites {
    use super::*;

    #[tokio::test]
    async fn test_list_favorites_filters_by_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/favorites"))
            .and(query_param("select", "track_id"))
            .and(query_param("user_id", "eq.guest:18c2f1a0b3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "track_id": 3 },
                { "track_id": "b7e2" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let ids = client.list_favorites(&guest()).await.unwrap();

        assert_eq!(ids, vec![TrackId::from("3"), TrackId::from("b7e2")]);
    }

    #[tokio::test]
    async fn test_add_favorite_posts_pair() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/favorites"))
            .and(header("apikey", ANON_KEY))
            .and(body_json(serde_json::json!({
                "user_id": "guest:18c2f1a0b3",
                "track_id": "3"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .add_favorite(&guest(), &TrackId::from("3"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_existing_favorite_is_ok() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/favorites"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client
            .add_favorite(&guest(), &TrackId::from("3"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_remove_favorite_deletes_by_pair() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/favorites"))
            .and(query_param("user_id", "eq.guest:18c2f1a0b3"))
            .and(query_param("track_id", "eq.3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client
            .remove_favorite(&guest(), &TrackId::from("3"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_maps_to_favorites_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/favorites"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        match client
            .remove_favorite(&guest(), &TrackId::from("3"))
            .await
            .unwrap_err()
        {
            PokoroError::Favorites(msg) => assert!(msg.contains("503")),
            e => panic!("Expected Favorites error, got: {:?}", e),
        }
    }
}
