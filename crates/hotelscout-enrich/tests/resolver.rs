//! Integration tests for `EnrichmentResolver` using wiremock HTTP mocks.

use hotelscout_core::{EnrichmentSource, HotelCandidate};
use hotelscout_enrich::{ContactClient, EnrichmentResolver};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_resolver(server: &MockServer) -> EnrichmentResolver {
    let client = ContactClient::with_base_urls(
        5,
        "hotelscout-test/0.1",
        &server.uri(),
        &format!("{}/places", server.uri()),
    )
    .expect("client construction should not fail");
    EnrichmentResolver::new(client)
}

fn candidate(name: Option<&str>, handle: Option<&str>) -> HotelCandidate {
    HotelCandidate {
        name: name.map(ToString::to_string),
        instagram_handle: handle.map(ToString::to_string),
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.to_string())
}

#[tokio::test]
async fn bio_then_crawl_then_contact_page() {
    let server = MockServer::start().await;
    let site = format!("{}/home", server.uri());

    Mock::given(method("GET"))
        .and(path("/GrandHotelSpa/"))
        .respond_with(html(&format!(
            r#"<div class="bio"><a href="{site}" rel="me">grandhotelspa.com</a></div>"#
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(html(
            r#"<nav><a href="/rooms">Rooms</a><a href="/contact">Contact</a></nav>
               <footer>Reservations: +1 (555) 123-4567</footer>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html(r#"<a href="mailto:stay@grandhotelspa.com">Email us</a>"#))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(&candidate(None, Some("GrandHotelSpa")), None)
        .await;

    assert_eq!(result.website.as_deref(), Some(site.as_str()));
    assert_eq!(result.email.as_deref(), Some("stay@grandhotelspa.com"));
    assert_eq!(result.phone.as_deref(), Some("+1 (555) 123-4567"));
    assert!(result.address.is_none());
    assert_eq!(result.source, EnrichmentSource::WebsiteCrawl);
}

#[tokio::test]
async fn bio_only_when_homepage_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/seaside_inn/"))
        .respond_with(html(&format!(
            r#"<a href="{}/gone">site</a> <a href="mailto:hello@seasideinn.com">mail</a>"#,
            server.uri()
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(&candidate(None, Some("seaside_inn")), None)
        .await;

    assert_eq!(result.email.as_deref(), Some("hello@seasideinn.com"));
    assert!(result.phone.is_none());
    assert_eq!(result.source, EnrichmentSource::InstagramBio);
}

#[tokio::test]
async fn places_never_overwrites_earlier_fields() {
    let server = MockServer::start().await;
    let site = format!("{}/lodge-site", server.uri());

    Mock::given(method("GET"))
        .and(path("/cliff_lodge/"))
        .respond_with(html(&format!(r#"<a href="{site}">web</a>"#)))
        .mount(&server)
        .await;
    // Homepage is unmocked and answers 404, so email stays missing.
    Mock::given(method("GET"))
        .and(path("/places/textsearch/json"))
        .and(query_param("query", "Cliff Lodge"))
        .and(query_param("key", "places-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "place_id": "abc123" }, { "place_id": "other" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/places/details/json"))
        .and(query_param("place_id", "abc123"))
        .and(query_param(
            "fields",
            "formatted_address,formatted_phone_number,website",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "website": "https://places-says-otherwise.example/",
                "formatted_address": "1 Cliff Rd, Cornwall",
                "formatted_phone_number": "+44 1234 567890"
            }
        })))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(
            &candidate(Some("Cliff Lodge"), Some("cliff_lodge")),
            Some("places-key"),
        )
        .await;

    assert_eq!(result.website.as_deref(), Some(site.as_str()));
    assert_eq!(result.address.as_deref(), Some("1 Cliff Rd, Cornwall"));
    assert_eq!(result.phone.as_deref(), Some("+44 1234 567890"));
    assert!(result.email.is_none());
    assert_eq!(result.source, EnrichmentSource::GooglePlaces);
}

#[tokio::test]
async fn places_claims_source_even_when_every_field_was_already_known() {
    let server = MockServer::start().await;
    let site = format!("{}/harbour-site", server.uri());

    Mock::given(method("GET"))
        .and(path("/harbour_inn/"))
        .respond_with(html(&format!(r#"<a href="{site}">web</a>"#)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/places/textsearch/json"))
        .and(query_param("query", "Harbour Inn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [{ "place_id": "harbour1" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/places/details/json"))
        .and(query_param("place_id", "harbour1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": { "website": "https://harbour-inn.example/" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(
            &candidate(Some("Harbour Inn"), Some("harbour_inn")),
            Some("places-key"),
        )
        .await;

    assert_eq!(result.website.as_deref(), Some(site.as_str()));
    assert!(result.address.is_none());
    assert!(result.phone.is_none());
    assert!(result.email.is_none());
    assert_eq!(result.source, EnrichmentSource::GooglePlaces);
}

#[tokio::test]
async fn places_skipped_when_website_and_email_known() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bellahotel/"))
        .respond_with(html(&format!(
            r#"<a href="{}/bella">web</a><a href="mailto:info@bella.it">mail</a>"#,
            server.uri()
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/places/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .expect(0)
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(
            &candidate(Some("Hotel Bella"), Some("bellahotel")),
            Some("places-key"),
        )
        .await;

    assert_eq!(result.source, EnrichmentSource::InstagramBio);
}

#[tokio::test]
async fn no_handle_no_name_no_key_yields_nothing() {
    let server = MockServer::start().await;

    let result = test_resolver(&server)
        .resolve(&candidate(None, None), None)
        .await;

    assert!(result.website.is_none());
    assert!(result.email.is_none());
    assert!(result.address.is_none());
    assert!(result.phone.is_none());
    assert_eq!(result.source, EnrichmentSource::None);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "expected no HTTP calls");
}

#[tokio::test]
async fn missing_bio_page_leaves_source_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/GrandHotelSpa/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(&candidate(None, Some("GrandHotelSpa")), None)
        .await;

    assert_eq!(result, hotelscout_core::EnrichmentResult::default());
}

#[tokio::test]
async fn malformed_places_response_is_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/places/textsearch/json"))
        .respond_with(html("<html>not json</html>"))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(&candidate(Some("Hotel Lumiere"), None), Some("places-key"))
        .await;

    assert_eq!(result.source, EnrichmentSource::None);
    assert!(result.website.is_none());
}

#[tokio::test]
async fn places_without_results_leaves_source_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/places/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let result = test_resolver(&server)
        .resolve(&candidate(Some("Nowhere Inn"), None), Some("places-key"))
        .await;

    assert_eq!(result.source, EnrichmentSource::None);
}
