//! End-to-end sessions for the documented example setups

use padbind::controller::device::NINTENDO_VENDOR_ID;
use padbind::controller::{DeviceDescriptor, InputTechnology, LogicalInput};
use padbind::mapping::encoder::{AxisSign, HatDirection, NativeBinding, NativeEncoder};
use padbind::mapping::engine::{BindingSession, Resolved, SessionOptions};
use padbind::mapping::mode::GameMode;
use padbind::mapping::overrides::OverrideLayer;
use padbind::mapping::sdl::{hat_axis_index, CommunityDatabase, HatMode, SdlEncoder};
use padbind::mapping::special::SpecialHardwareCatalog;
use padbind::mapping::xinput::XInputEncoder;
use padbind::target::{PeripheralType, Target};

fn run(
    options: SessionOptions,
    database: CommunityDatabase,
    catalog: SpecialHardwareCatalog,
    devices: &[DeviceDescriptor],
) -> BindingSession<Resolved> {
    BindingSession::prepare(options, database, catalog).resolve(devices)
}

#[test]
fn classic_controller_on_xinput_pad() {
    let mut options = SessionOptions::new(Target::Dolphin);
    options.peripheral = Some(PeripheralType::Classic);
    let pad = DeviceDescriptor::new(InputTechnology::XInput, 1);

    let resolved = run(
        options,
        CommunityDatabase::default(),
        SpecialHardwareCatalog::default(),
        std::slice::from_ref(&pad),
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };

    assert_eq!(player.value("Wiimote1/Classic/Buttons/-"), Some("`Back`"));
    assert_eq!(player.value("Wiimote1/Extension"), Some("Classic"));

    let up = player.value("Wiimote1/Classic/Left Stick/Up");
    let down = player.value("Wiimote1/Classic/Left Stick/Down");
    assert_eq!(up, Some("`Left Y+`"));
    assert_eq!(down, Some("`Left Y-`"));

    let encoder = XInputEncoder;
    let up = encoder.encode(LogicalInput::LeftStickUp, &pad);
    let down = encoder.encode(LogicalInput::LeftStickDown, &pad);
    assert_eq!(up.bound().and_then(NativeBinding::opposite).as_ref(), down.bound());
}

#[test]
fn identical_dinput_pads_get_distinct_identities() {
    let mut first = DeviceDescriptor::new(InputTechnology::DirectInput, 1);
    first.guid = "03000000790000000600000000000000".to_string();
    first.name = "USB Gamepad".to_string();
    let mut second = first.clone();
    second.player_index = 2;
    second.native_index = 1;

    let resolved = run(
        SessionOptions::new(Target::Dolphin),
        CommunityDatabase::default(),
        SpecialHardwareCatalog::default(),
        &[second, first],
    );
    let (Some(p1), Some(p2)) = (resolved.device(1), resolved.device(2)) else {
        panic!("both players expected: {:?}", resolved.failures());
    };

    let a = &p1.identity.identity;
    let b = &p2.identity.identity;
    assert_ne!(a, b);
    assert_eq!(a[..a.len() - 1], b[..b.len() - 1]);
    assert!(a < b);
    assert_eq!(p1.value("GCPad1/Device"), Some("DInput/0/USB Gamepad"));
    assert_eq!(p2.value("GCPad2/Device"), Some("DInput/1/USB Gamepad"));
}

#[test]
fn hat_fix_shifts_hat_axes() {
    // DualShock 4 v1: Hat-Fix 1
    let line = "030000004c050000c405000000000000,PS4 Controller,a:b1,b:b2,x:b0,y:b3,\
                dpup:h0.1,dpright:h0.2,dpdown:h0.4,dpleft:h0.8,leftx:a0,lefty:a1,\
                rightx:a2,righty:a5,lefttrigger:a3,righttrigger:a4,";
    let database = CommunityDatabase::parse(line, None);

    let mut pad = DeviceDescriptor::new(InputTechnology::Sdl, 1);
    pad.guid = "030000004c050000c405000000000000".to_string();
    pad.vendor_id = 0x054c;
    pad.product_id = 0x05c4;
    pad.axis_count = 6;
    pad.hat_count = 1;

    // dpdown:h0.4, Maske 4 ist unten
    assert_eq!(HatDirection::from_mask(4), Some(HatDirection::Down));
    assert_eq!(hat_axis_index(&pad, 0, HatDirection::Down), Some(6));
    assert_eq!(hat_axis_index(&pad, 1, HatDirection::Down), None);

    let encoder = SdlEncoder::new(&database, HatMode::AsAxes);
    // naiv 6 (horizontal) bzw. 7 (vertikal), minus 1
    assert_eq!(
        encoder.encode(LogicalInput::Right, &pad).bound(),
        Some(&NativeBinding::Axis {
            index: 5,
            sign: AxisSign::Positive
        })
    );
    assert_eq!(
        encoder.encode(LogicalInput::Down, &pad).bound(),
        Some(&NativeBinding::Axis {
            index: 6,
            sign: AxisSign::Positive
        })
    );

    let resolved = run(
        SessionOptions::new(Target::Model2),
        database.clone(),
        SpecialHardwareCatalog::default(),
        std::slice::from_ref(&pad),
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(player.value("Input1/Right"), Some("0x104B"));
    assert_eq!(player.value("Input1/Down"), Some("0x104D"));
}

fn switch_pad() -> DeviceDescriptor {
    let mut pad = DeviceDescriptor::new(InputTechnology::Sdl, 1);
    pad.guid = "030000007e0500000920000000000000".to_string();
    pad.vendor_id = NINTENDO_VENDOR_ID;
    pad.product_id = 0x2009;
    pad.name = "Pro Controller".to_string();
    pad
}

fn locked_catalog() -> SpecialHardwareCatalog {
    let json = r#"{ "profiles": [{
        "name": "pro-arcade",
        "guid": "030000007e0500000920000000000000",
        "needs_activation": true,
        "mapping": { "south": "x" },
        "hotkeys": { "exit": "guide" }
    }] }"#;
    match SpecialHardwareCatalog::parse(json, "inline") {
        Ok(catalog) => catalog,
        Err(e) => panic!("catalog should parse: {e}"),
    }
}

#[test]
fn locked_special_profile_falls_through_to_vendor_swap() {
    let mut options = SessionOptions::new(Target::RetroArch);
    options.nintendo_layout = true;

    let resolved = run(
        options,
        CommunityDatabase::default(),
        locked_catalog(),
        &[switch_pad()],
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(player.layers, vec![OverrideLayer::VendorSwap]);
    // Süd liegt jetzt auf RetroPad A, generischer Eintrag: a:b0
    assert_eq!(player.value("input_player1_a_btn"), Some("0"));
    assert_eq!(player.value("input_player1_b_btn"), Some("1"));
}

#[test]
fn activated_special_profile_wins_over_vendor_swap() {
    let mut options = SessionOptions::new(Target::RetroArch);
    options.nintendo_layout = true;
    options.activated_profiles = vec!["pro-arcade".to_string()];

    let resolved = run(
        options,
        CommunityDatabase::default(),
        locked_catalog(),
        &[switch_pad()],
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(
        player.layers,
        vec![OverrideLayer::SpecialHardware("pro-arcade".to_string())]
    );
    assert_eq!(player.value("input_player1_x_btn"), Some("0"));
    // Exit-Hotkey: Select + Guide (generisch b10)
    assert_eq!(player.value("input_exit_emulator_btn"), Some("10"));
}

#[test]
fn game_mode_applies_on_top_of_vendor_swap() {
    let mut options = SessionOptions::new(Target::Dolphin);
    options.nintendo_layout = true;
    options.mode = GameMode::select(None, Some("Zelda [sideways].wbfs"));

    let resolved = run(
        options,
        CommunityDatabase::default(),
        SpecialHardwareCatalog::default(),
        &[switch_pad()],
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(player.peripheral, PeripheralType::Wiimote);
    assert_eq!(
        player.layers,
        vec![
            OverrideLayer::VendorSwap,
            OverrideLayer::GameMode(GameMode::Sideways)
        ]
    );
    // Modus setzt Süd auf "2", unabhängig vom Tausch darunter
    assert_eq!(player.value("Wiimote1/Buttons/2"), Some("`Button 0`"));
    assert_eq!(player.value("Wiimote1/D-Pad/Left"), Some("`Hat 0 N`"));
}

#[test]
fn game_mode_applies_on_top_of_special_profile() {
    let json = r#"{ "profiles": [{
        "name": "pro-dpad",
        "guid": "030000007e0500000920000000000000",
        "mapping": { "up": "D-Pad/Right" }
    }] }"#;
    let catalog = match SpecialHardwareCatalog::parse(json, "inline") {
        Ok(catalog) => catalog,
        Err(e) => panic!("catalog should parse: {e}"),
    };
    let mut options = SessionOptions::new(Target::Dolphin);
    options.mode = GameMode::select(None, Some("Zelda [sideways].wbfs"));

    let resolved = run(options, CommunityDatabase::default(), catalog, &[switch_pad()]);
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(
        player.layers,
        vec![
            OverrideLayer::SpecialHardware("pro-dpad".to_string()),
            OverrideLayer::GameMode(GameMode::Sideways)
        ]
    );
    // Oben liegt laut Profil rechts, der Modus dreht es nach links
    assert_eq!(player.value("Wiimote1/D-Pad/Left"), Some("`Hat 0 N`"));
    assert_eq!(player.value("Wiimote1/D-Pad/Right"), Some("`Hat 0 S`"));
}

#[test]
fn special_profile_matches_xinput_pad() {
    let json = r#"{ "profiles": [{
        "name": "xpad-arcade",
        "guid": "78696e70757401000000000000000000",
        "targets": ["retroarch"],
        "mapping": { "south": "x" },
        "hotkeys": { "exit": "guide" }
    }] }"#;
    let catalog = match SpecialHardwareCatalog::parse(json, "inline") {
        Ok(catalog) => catalog,
        Err(e) => panic!("catalog should parse: {e}"),
    };
    let pad = DeviceDescriptor::new(InputTechnology::XInput, 1);

    let resolved = run(
        SessionOptions::new(Target::RetroArch),
        CommunityDatabase::default(),
        catalog,
        std::slice::from_ref(&pad),
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing: {:?}", resolved.failures());
    };
    assert_eq!(
        player.layers,
        vec![OverrideLayer::SpecialHardware("xpad-arcade".to_string())]
    );
    assert_eq!(player.value("input_player1_x_btn"), Some("0"));
    assert_eq!(player.value("input_exit_emulator_btn"), Some("10"));
}

#[test]
fn special_profile_skipped_for_other_targets() {
    let json = r#"{ "profiles": [{
        "name": "ra-only",
        "guid": "030000007e0500000920000000000000",
        "targets": ["retroarch"],
        "mapping": { "south": "Buttons/Z" }
    }] }"#;
    let catalog = match SpecialHardwareCatalog::parse(json, "inline") {
        Ok(catalog) => catalog,
        Err(e) => panic!("catalog should parse: {e}"),
    };
    let resolved = run(
        SessionOptions::new(Target::Dolphin),
        CommunityDatabase::default(),
        catalog,
        &[switch_pad()],
    );
    let Some(player) = resolved.device(1) else {
        panic!("player 1 missing");
    };
    assert_eq!(player.layers, vec![OverrideLayer::Base]);
    assert_eq!(player.value("GCPad1/Buttons/A"), Some("`Button 0`"));
}
