use planhat::http::{add_options, encode_path_segment, map_status_to_error};
use planhat::{
    AssetListOptions, CompanyListOptions, ErrorKind, Key, LeanCompanyListOptions,
    MetricsListOptions,
};
use reqwest::StatusCode;

#[test]
fn status_error_mapping() {
    assert_eq!(
        map_status_to_error(StatusCode::UNAUTHORIZED),
        Some(ErrorKind::Unauthorized)
    );
    assert_eq!(
        map_status_to_error(StatusCode::TOO_MANY_REQUESTS),
        Some(ErrorKind::Unknown)
    );
    assert_eq!(map_status_to_error(StatusCode::ACCEPTED), None);
}

#[test]
fn asset_options_full_set() {
    let opts = AssetListOptions {
        limit: Some(100),
        offset: Some(200),
        sort: Some("-name".into()),
        select: Some("one,two,three".into()),
    };
    let got = add_options("https://api.planhat.com/assets", &opts).unwrap();
    assert_eq!(
        got,
        "https://api.planhat.com/assets?limit=100&offset=200&select=one%2Ctwo%2Cthree&sort=-name"
    );
}

#[test]
fn company_options_partial_set() {
    let opts = CompanyListOptions {
        limit: Some(100),
        sort: Some("name".into()),
        ..Default::default()
    };
    let got = add_options("https://api.planhat.com/companies", &opts).unwrap();
    assert_eq!(got, "https://api.planhat.com/companies?limit=100&sort=name");
    assert!(!got.contains("offset"));
    assert!(!got.contains("select"));
}

#[test]
fn lean_options_use_api_names() {
    let opts = LeanCompanyListOptions {
        external_id: Some("ext 1".into()),
        status: Some("customer".into()),
        ..Default::default()
    };
    let got = add_options("https://api.planhat.com/leancompanies", &opts).unwrap();
    assert_eq!(
        got,
        "https://api.planhat.com/leancompanies?externalId=ext+1&status=customer"
    );
}

#[test]
fn metrics_options_sorted() {
    let opts = MetricsListOptions {
        to: Some(19000),
        from: Some(18990),
        cid: Some("c1".into()),
        dimid: Some("logins".into()),
        ..Default::default()
    };
    let got = add_options("https://api.planhat.com/dimensiondata", &opts).unwrap();
    assert_eq!(
        got,
        "https://api.planhat.com/dimensiondata?cid=c1&dimid=logins&from=18990&to=19000"
    );
}

#[test]
fn alternate_key_segments() {
    assert_eq!(Key::ExternalId("abc".into()).path_segment(), "extid-abc");
    assert_eq!(Key::SourceId("xyz".into()).path_segment(), "srcid-xyz");
    assert_eq!(encode_path_segment("abc-._~123"), "abc-._~123");
}
