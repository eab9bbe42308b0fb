use geotxt_domain::DataSource;
use std::path::PathBuf;

#[test]
fn test_http_url_is_remote() {
    let source = DataSource::resolve("http://updates.example.com/GeoLite2-City.mmdb.gz");
    assert_eq!(
        source,
        DataSource::Remote("http://updates.example.com/GeoLite2-City.mmdb.gz".to_string())
    );
    assert!(source.is_remote());
}

#[test]
fn test_https_url_is_remote() {
    assert!(DataSource::resolve("https://example.com/db.tar.gz").is_remote());
}

#[test]
fn test_absolute_path_is_local() {
    let source = DataSource::resolve("/var/lib/geo/GeoLite2-City.mmdb");
    assert_eq!(
        source,
        DataSource::Local(PathBuf::from("/var/lib/geo/GeoLite2-City.mmdb"))
    );
}

#[test]
fn test_relative_path_is_local() {
    assert_eq!(
        DataSource::resolve("data/city.mmdb"),
        DataSource::Local(PathBuf::from("data/city.mmdb"))
    );
}

#[test]
fn test_malformed_input_falls_back_to_local() {
    // failure is deferred to the open step
    assert!(!DataSource::resolve("ht tp://broken url").is_remote());
    assert!(!DataSource::resolve("").is_remote());
}

#[test]
fn test_display_round_trips_the_original_string() {
    assert_eq!(
        DataSource::resolve("https://example.com/db.mmdb").to_string(),
        "https://example.com/db.mmdb"
    );
    assert_eq!(
        DataSource::resolve("/tmp/db.mmdb").to_string(),
        "/tmp/db.mmdb"
    );
}
