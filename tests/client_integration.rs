use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yolp_api::{Client, ContentsQuery, Coordinate, Datum, Error, GeocodeQuery, ZipcodeQuery};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn geocode_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("geocode.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/geoCoder"))
        .and(query_param("query", "東京都千代田区丸の内一丁目"))
        .and(query_param("appid", "TEST_APP_ID"))
        .and(query_param("output", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .geocode(&GeocodeQuery::default().with_query("東京都千代田区丸の内一丁目"))
        .await
        .unwrap();

    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["Name"], "東京都千代田区丸の内一丁目");

    let result = client.last_result().unwrap();
    assert_eq!(result["Count"], 2);

    let raw = client.last_response().unwrap();
    assert_eq!(raw.status, 200);
    assert!(raw.body.contains("ResultInfo"));
}

#[tokio::test]
async fn invalid_credential_raises_service_error() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("error_auth.json");

    // Auth failures come back with a 403, but detection is payload-driven.
    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/geoCoder"))
        .respond_with(ResponseTemplate::new(403).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("INVALID", &mock_server.uri());
    let err = client
        .geocode(&GeocodeQuery::default().with_query("some address"))
        .await
        .unwrap_err();

    match err {
        Error::Service {
            message,
            code,
            detail,
            response,
        } => {
            assert_eq!(message, "Your Application ID is invalid.");
            assert_eq!(code, None);
            assert_eq!(detail, "");
            assert_eq!(response.status, 403);
        }
        other => panic!("expected service error, got {:?}", other),
    }

    // The raw response is recorded even for failed calls.
    assert_eq!(client.last_response().unwrap().status, 403);
}

#[tokio::test]
async fn zipcode_no_match_returns_empty_list() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("zipcode_empty.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/zipCodeSearch"))
        .and(query_param("query", "000-0000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .zipcode(&ZipcodeQuery::default().with_query("000-0000"))
        .await
        .unwrap();

    assert!(features.is_empty());
    assert_eq!(client.last_result().unwrap()["Count"], 0);
}

#[tokio::test]
async fn reverse_geocode_out_of_range_surfaces_code() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("error_1004.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/reverseGeoCoder"))
        .and(query_param("lat", "-100"))
        .and(query_param("lon", "-203"))
        .respond_with(ResponseTemplate::new(400).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let err = client.reverse_geocode(-100.0, -203.0, None).await.unwrap_err();

    match err {
        Error::Service { code, detail, .. } => {
            assert_eq!(code, Some(1004));
            assert_eq!(detail, "latitude is out of range");
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn distance_serializes_both_pairs_lon_lat() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("distance.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/distance"))
        .and(query_param(
            "coordinates",
            "139.767448,35.680243 139.763153,35.674891",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .distance(
            Coordinate::new(35.680243, 139.767448),
            Coordinate::new(35.674891, 139.763153),
        )
        .await
        .unwrap();

    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["Property"]["Distance"], "0.6783");
}

#[tokio::test]
async fn datum_convert_two_pairs_returns_two_features() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("datum_two.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/datumConvert"))
        .and(query_param(
            "coordinates",
            "139.767448,35.680243,139.763153,35.674891",
        ))
        .and(query_param("datum", "tky"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .datum_convert(
            &[
                Coordinate::new(35.680243, 139.767448),
                Coordinate::new(35.674891, 139.763153),
            ],
            Some(Datum::Tky),
        )
        .await
        .unwrap();

    assert_eq!(features.len(), 2);
    assert!(client.last_result().is_some());
}

#[tokio::test]
async fn datum_convert_requires_coordinates() {
    let mut client = Client::new("TEST_APP_ID");
    let err = client.datum_convert(&[], None).await.unwrap_err();
    assert!(matches!(err, Error::NoCoordinates));
}

#[tokio::test]
async fn altitude_one_feature_per_pair() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("datum_two.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/getAltitude"))
        .and(query_param(
            "coordinates",
            "139.767448,35.680243,139.763153,35.674891",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .altitude(&[
            Coordinate::new(35.680243, 139.767448),
            Coordinate::new(35.674891, 139.763153),
        ])
        .await
        .unwrap();

    assert_eq!(features.len(), 2);
}

#[tokio::test]
async fn contents_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("geocode.json");

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/contentsGeoCoder"))
        .and(query_param("query", "東京駅"))
        .and(query_param("category", "landmark"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let features = client
        .contents("東京駅", &ContentsQuery::default().with_category("landmark"))
        .await
        .unwrap();

    assert_eq!(features.len(), 2);
    assert!(client.last_result().is_some());
}

#[tokio::test]
async fn place_returns_result_set_and_clears_last_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/geoCoder"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("geocode.json")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/V1/get"))
        .and(query_param("lat", "35.674891"))
        .and(query_param("lon", "139.763153"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("place.json")))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());

    // A feature-returning call populates the last-result state first.
    client.geocode(&GeocodeQuery::default()).await.unwrap();
    assert!(client.last_result().is_some());

    let result_set = client.place(35.674891, 139.763153).await.unwrap();
    let areas = result_set["Area"].as_array().unwrap();
    assert!(!areas.is_empty());
    assert_eq!(areas[0]["Name"], "丸の内");

    assert!(client.last_result().is_none());
}

#[tokio::test]
async fn place_falls_back_to_xml_body() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("place.xml");

    Mock::given(method("GET"))
        .and(path("/V1/get"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "application/xml"))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let result_set = client.place(35.674891, 139.763153).await.unwrap();

    let areas = result_set["Area"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[1]["Name"], "東京駅周辺");
    assert_eq!(result_set["Govcode"], "13101");
}

#[tokio::test]
async fn unparsable_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/OpenLocalPlatform/V1/geoCoder"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url("TEST_APP_ID", &mock_server.uri());
    let err = client.geocode(&GeocodeQuery::default()).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
