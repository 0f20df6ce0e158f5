use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use payloads::{APIClient, ClientError, Identifier};
use reqwest::StatusCode;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// Request paths seen by the fake ad service, in order.
type Hits = Arc<Mutex<Vec<String>>>;

struct TestService {
    address: String,
    client: APIClient,
    hits: Hits,
}

async fn cta_details(
    req: HttpRequest,
    path: web::Path<String>,
    hits: web::Data<Hits>,
) -> HttpResponse {
    let identifier = path.into_inner();
    hits.lock().unwrap().push(req.path().to_string());

    match identifier.as_str() {
        "0x123" => HttpResponse::Ok().json(serde_json::json!({
            "image": "https://example.com/ad-image.jpg",
            "url": "https://example.com/ad-destination",
            "buySlotUrl": "https://example.com/buy-slot",
            "buyer": {
                "fid": 12345,
                "username": "testuser",
                "avatar": "https://example.com/avatar.jpg",
                "displayName": "Test User",
                "address": "0x1234567890abcdef"
            }
        })),
        "unsold" => HttpResponse::Ok().json(serde_json::json!({
            "image": "i",
            "url": "u",
            "buySlotUrl": "b"
        })),
        "broken" => HttpResponse::InternalServerError().body("boom"),
        _ => HttpResponse::NotFound().finish(),
    }
}

/// Start the fake ad service on a port chosen by the OS.
fn spawn_service() -> TestService {
    let hits: Hits = Arc::default();
    let data = web::Data::new(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).route(
            "/api/ads/cta-details/{identifier}",
            web::get().to(cta_details),
        )
    })
    .listen(listener)
    .unwrap()
    .workers(1)
    .run();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{port}");
    TestService {
        client: APIClient::new(address.clone()),
        address,
        hits,
    }
}

#[tokio::test]
async fn fetches_ad_details() -> anyhow::Result<()> {
    let service = spawn_service();
    let id = Identifier::parse("0x123").unwrap();

    let details = service.client.ad_details(&id).await?;

    assert_eq!(details.image, "https://example.com/ad-image.jpg");
    assert_eq!(details.url, "https://example.com/ad-destination");
    assert_eq!(details.buy_slot_url, "https://example.com/buy-slot");
    assert_eq!(details.buyer.unwrap().username, "testuser");
    Ok(())
}

#[tokio::test]
async fn requests_use_trimmed_identifier() -> anyhow::Result<()> {
    let service = spawn_service();
    let id = Identifier::parse("  0x123  ").unwrap();

    service.client.ad_details(&id).await?;

    assert_eq!(
        *service.hits.lock().unwrap(),
        vec!["/api/ads/cta-details/0x123".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn reported_url_is_the_one_requested() -> anyhow::Result<()> {
    let service = spawn_service();
    let id = Identifier::parse("0x123").unwrap();

    service.client.ad_details(&id).await?;

    let hits = service.hits.lock().unwrap().clone();
    assert_eq!(hits.len(), 1);
    assert_eq!(
        service.client.ad_details_url(&id),
        format!("{}{}", service.address, hits[0])
    );
    Ok(())
}

#[tokio::test]
async fn missing_buyer_is_none() -> anyhow::Result<()> {
    let service = spawn_service();
    let id = Identifier::parse("unsold").unwrap();

    let details = service.client.ad_details(&id).await?;

    assert!(details.buyer.is_none());
    assert_eq!(details.display_image(Some("d")), "d");
    Ok(())
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let service = spawn_service();
    let id = Identifier::parse("nope").unwrap();

    let err = service.client.ad_details(&id).await.unwrap_err();

    assert!(matches!(err, ClientError::Status(StatusCode::NOT_FOUND)));
    assert_eq!(err.to_string(), "Failed to fetch: 404");
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let service = spawn_service();
    let id = Identifier::parse("broken").unwrap();

    let result = service.client.ad_details(&id).await;

    assert!(matches!(
        result,
        Err(ClientError::Status(StatusCode::INTERNAL_SERVER_ERROR))
    ));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Grab a free port, then release it so nothing is listening there.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = APIClient::new(format!("http://127.0.0.1:{port}"));
    let id = Identifier::parse("0x123").unwrap();

    let result = client.ad_details(&id).await;

    match result {
        Err(ClientError::Network(e)) => assert!(!e.to_string().is_empty()),
        other => panic!("Expected network error, got {other:?}"),
    }
}
