use padbind::config::SessionConfig;
use padbind::controller::{DeviceDescriptor, InputTechnology};
use padbind::mapping::sdl::CommunityDatabase;
use padbind::mapping::special::SpecialHardwareCatalog;
use padbind::mapping::BindingError;
use padbind::target::Target;
use std::fs;
use tempfile::TempDir;

const DB: &str = "\
# Community mappings
03000000790000000600000000000000,Generic USB Joystick,a:b2,b:b1,x:b3,y:b0,platform:Windows,
030000005e0400008e02000000007200,Xbox 360 Controller,a:b0,b:b1,platform:Linux,
";

const CATALOG: &str = r#"{ "profiles": [
    { "name": "arcade", "guid": "03000000790000000600000000000000",
      "targets": ["retroarch"], "mapping": { "south": ["b", "l2"] } }
] }"#;

fn pad(guid: &str) -> DeviceDescriptor {
    let mut device = DeviceDescriptor::new(InputTechnology::DirectInput, 1);
    device.guid = guid.to_string();
    device
}

#[test]
fn database_file_is_filtered_by_platform() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("gamecontrollerdb.txt");
    fs::write(&path, DB).expect("write db");

    let all = CommunityDatabase::load(&path, None).expect("load db");
    assert_eq!(all.len(), 2);

    let windows = CommunityDatabase::load(&path, Some("Windows")).expect("load db");
    assert_eq!(windows.len(), 1);
    assert!(windows
        .lookup(&pad("03000000790000000600000000000000").fingerprint())
        .is_some());
    assert!(windows
        .lookup(&pad("030000005e0400008e02000000007200").fingerprint())
        .is_none());
}

#[test]
fn missing_database_is_a_load_failure() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.txt");

    assert!(matches!(
        CommunityDatabase::load(&path, None),
        Err(BindingError::CatalogLoadFailure { .. })
    ));
    assert!(CommunityDatabase::load_or_empty(&path, None).is_empty());
}

#[test]
fn special_catalog_round_trips_through_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("special.json");
    fs::write(&path, CATALOG).expect("write catalog");

    let catalog = SpecialHardwareCatalog::load(&path).expect("load catalog");
    assert_eq!(catalog.len(), 1);

    let fingerprint = pad("0300abcd790000000600000000000000").fingerprint();
    let profile = catalog.find(&fingerprint, Target::RetroArch);
    assert_eq!(profile.map(|p| p.name.as_str()), Some("arcade"));
    assert!(catalog.find(&fingerprint, Target::Dolphin).is_none());
}

#[test]
fn malformed_catalog_degrades_to_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("special.json");
    fs::write(&path, "{ \"profiles\": [ { \"name\": ").expect("write catalog");

    let err = SpecialHardwareCatalog::load(&path).expect_err("truncated json");
    assert!(matches!(err, BindingError::CatalogLoadFailure { .. }));
    assert!(SpecialHardwareCatalog::load_or_empty(&path).is_empty());
}

#[test]
fn session_file_is_created_once_and_reloaded() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("session.toml");

    SessionConfig::ensure_default(&path).expect("create default");
    assert!(path.exists());
    let created = fs::read_to_string(&path).expect("read session");

    let mut config = SessionConfig::load(&path).expect("load default");
    assert_eq!(config, SessionConfig::default());

    config.target = Target::Pcsx2;
    config.devices = vec![DeviceDescriptor::new(InputTechnology::XInput, 1)];
    config.save(&path).expect("save session");

    let reloaded = SessionConfig::load(&path).expect("reload session");
    assert_eq!(reloaded, config);

    // Existierende Datei bleibt unangetastet
    SessionConfig::ensure_default(&path).expect("ensure again");
    assert_ne!(fs::read_to_string(&path).expect("read session"), created);
}

#[test]
fn session_tables_load_from_configured_paths() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("gamecontrollerdb.txt");
    let catalog_path = dir.path().join("special.json");
    fs::write(&db_path, DB).expect("write db");
    fs::write(&catalog_path, CATALOG).expect("write catalog");

    let config = SessionConfig {
        gamecontrollerdb: Some(db_path),
        special_catalog: Some(catalog_path),
        platform: Some("linux".to_string()),
        ..SessionConfig::default()
    };
    assert_eq!(config.load_database().len(), 1);
    assert_eq!(config.load_catalog().len(), 1);
}
