//! Binding-Sitzung als statum State Machine
//!
//! ```text
//! Prepared ──resolve(devices)──► Resolved ──write_to(sink)
//! ```
//!
//! `Prepared` hält die eager geladenen Tabellen (Community-Datenbank,
//! Sonder-Hardware-Katalog) und die Sitzungsoptionen. `resolve` ist ein
//! einziger synchroner Durchlauf über alle Geräte, aufsteigend nach
//! Spielernummer. Fehler eines Geräts werden gesammelt, die übrigen Geräte
//! laufen weiter.

use crate::controller::{DeviceDescriptor, InputTechnology, LogicalInput};
use crate::mapping::encoder::{EncoderSet, Encoded};
use crate::mapping::hotkey::HotkeyComposer;
use crate::mapping::identity::{resolve_identities, DeviceIdentity, IdentityResult};
use crate::mapping::keyboard::{KeyboardEncoder, KeyboardLayout};
use crate::mapping::mode::GameMode;
use crate::mapping::mouse::MouseEncoder;
use crate::mapping::overrides::{self, OverrideContext, OverrideLayer};
use crate::mapping::profile::{MappingProfile, NativeToken, ReverseAxisTable};
use crate::mapping::sdl::{CommunityDatabase, DbEntry, SdlEncoder};
use crate::mapping::sink::{BindingSink, ResolvedBinding};
use crate::mapping::special::SpecialHardwareCatalog;
use crate::mapping::xinput::XInputEncoder;
use crate::mapping::BindingError;
use crate::target::{DeviceContext, PeripheralType, Target};
use statum::{machine, state};
use tracing::{debug, error, info, warn};

/// Optionen einer Sitzung
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub target: Target,
    /// Explizite Peripherie; ein Spielmodus hat Vorrang
    pub peripheral: Option<PeripheralType>,
    pub mode: Option<GameMode>,
    pub layout: KeyboardLayout,
    pub nintendo_layout: bool,
    pub invert_mouse_buttons: bool,
    pub activated_profiles: Vec<String>,
}

impl SessionOptions {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            peripheral: None,
            mode: None,
            layout: KeyboardLayout::default(),
            nintendo_layout: false,
            invert_mouse_buttons: false,
            activated_profiles: Vec::new(),
        }
    }
}

/// Fehler eines einzelnen Geräts
#[derive(Debug)]
pub struct DeviceFailure {
    pub player_index: u8,
    pub error: BindingError,
}

/// Ergebnis für ein Gerät
#[derive(Debug, Clone)]
pub struct DeviceBindings {
    pub player_index: u8,
    pub identity: DeviceIdentity,
    pub peripheral: PeripheralType,
    pub profile_name: String,
    pub layers: Vec<OverrideLayer>,
    pub bindings: Vec<ResolvedBinding>,
}

impl DeviceBindings {
    /// Erster Wert unter `path`, auch aus negativen Achsenhälften
    pub fn value(&self, path: &str) -> Option<&str> {
        self.bindings.iter().find_map(|b| {
            if b.path == path {
                return Some(b.value.as_str());
            }
            match &b.reverse {
                Some((reverse_path, value)) if reverse_path == path => Some(value.as_str()),
                _ => None,
            }
        })
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum SessionState {
    Prepared,
    Resolved,
}

#[machine]
#[derive(Debug)]
pub struct BindingSession<S: SessionState> {
    options: SessionOptions,
    database: CommunityDatabase,
    catalog: SpecialHardwareCatalog,
    devices: Vec<DeviceBindings>,
    failures: Vec<DeviceFailure>,
}

impl<S: SessionState> BindingSession<S> {
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl BindingSession<Prepared> {
    pub fn prepare(
        mut options: SessionOptions,
        database: CommunityDatabase,
        catalog: SpecialHardwareCatalog,
    ) -> Self {
        if let Some(mode) = options.mode {
            if !mode.supports(options.target) {
                warn!("Mode {} is not available for {}; ignoring", mode, options.target);
                options.mode = None;
            }
        }
        info!(
            "Preparing {} session ({} community mappings, {} special profiles)",
            options.target,
            database.len(),
            catalog.len()
        );
        Self::new(options, database, catalog, Vec::new(), Vec::new())
    }

    /// Löst alle Geräte auf und wechselt nach `Resolved`
    pub fn resolve(mut self, devices: &[DeviceDescriptor]) -> BindingSession<Resolved> {
        let identities = resolve_identities(devices);
        let mut order: Vec<usize> = (0..devices.len()).collect();
        order.sort_by_key(|&pos| devices[pos].player_index);

        let target = self.options.target;
        let (resolved, failures) = self.resolve_all(devices, &identities, &order);
        info!(
            "Resolved {} of {} devices for {}",
            resolved.len(),
            devices.len(),
            target
        );
        self.devices = resolved;
        self.failures = failures;
        self.transition()
    }

    fn resolve_all(
        &self,
        devices: &[DeviceDescriptor],
        identities: &[IdentityResult],
        order: &[usize],
    ) -> (Vec<DeviceBindings>, Vec<DeviceFailure>) {
        let target = self.options.target;
        let encoders = EncoderSet {
            xinput: XInputEncoder,
            sdl: SdlEncoder::new(&self.database, target.hat_mode()),
            keyboard: KeyboardEncoder::new(target.key_numbering(), self.options.layout),
            mouse: MouseEncoder::new(target.gun_roles(), self.options.invert_mouse_buttons),
        };

        let mut resolved = Vec::new();
        let mut failures = Vec::new();
        for &pos in order {
            let device = &devices[pos];
            let outcome = match &identities[pos] {
                Ok(identity) => {
                    resolve_device(&self.options, &self.catalog, &encoders, device, identity)
                }
                Err(e) => Err(e.clone()),
            };
            match outcome {
                Ok(bindings) => {
                    debug!(
                        "Player {}: {} bindings via {}",
                        device.player_index,
                        bindings.bindings.len(),
                        bindings.profile_name
                    );
                    resolved.push(bindings);
                }
                Err(e) => {
                    error!("Skipping player {}: {}", device.player_index, e);
                    failures.push(DeviceFailure {
                        player_index: device.player_index,
                        error: e,
                    });
                }
            }
        }
        (resolved, failures)
    }
}

impl BindingSession<Resolved> {
    pub fn devices(&self) -> &[DeviceBindings] {
        &self.devices
    }

    pub fn device(&self, player_index: u8) -> Option<&DeviceBindings> {
        self.devices.iter().find(|d| d.player_index == player_index)
    }

    /// Alle Bindings in Ausgabereihenfolge
    pub fn bindings(&self) -> impl Iterator<Item = &ResolvedBinding> {
        self.devices.iter().flat_map(|d| d.bindings.iter())
    }

    pub fn failures(&self) -> &[DeviceFailure] {
        &self.failures
    }

    pub fn write_to<K: BindingSink + ?Sized>(&self, sink: &mut K) {
        for binding in self.bindings() {
            binding.write_to(sink);
        }
    }
}

/// Peripherie: Modus, dann Option, dann Standard des Ziels
fn select_peripheral(options: &SessionOptions) -> PeripheralType {
    options
        .mode
        .map(GameMode::peripheral)
        .or(options.peripheral)
        .unwrap_or_else(|| options.target.default_peripheral())
}

fn uses_database(technology: InputTechnology) -> bool {
    matches!(technology, InputTechnology::DirectInput | InputTechnology::Sdl)
}

/// Besitzt die Gegenrichtung von `input` den Pfad `token`?
fn owned_by_opposite(profile: &MappingProfile, input: LogicalInput, token: &str) -> bool {
    input
        .opposite()
        .is_some_and(|opposite| profile.binds(opposite, token))
}

/// Negative Hälfte, deren positive Hälfte bei der Gegenrichtung liegt. Sie
/// wird zusammen mit dieser geschrieben. Liegt sie nach einem Override bei
/// einer anderen Eingabe, steht sie allein.
fn emitted_as_reverse(
    input: LogicalInput,
    token: &str,
    profile: &MappingProfile,
    reverse: &ReverseAxisTable,
) -> bool {
    reverse
        .positive_of(token)
        .is_some_and(|positive| owned_by_opposite(profile, input, positive))
}

fn resolve_device(
    options: &SessionOptions,
    catalog: &SpecialHardwareCatalog,
    encoders: &EncoderSet<'_>,
    device: &DeviceDescriptor,
    identity: &DeviceIdentity,
) -> Result<DeviceBindings, BindingError> {
    let target = options.target;
    let peripheral = select_peripheral(options);
    let base = target.profile(peripheral)?;

    let resolved = overrides::resolve(
        &base,
        device,
        &OverrideContext {
            target,
            mode: options.mode,
            catalog,
            activated_profiles: &options.activated_profiles,
            nintendo_layout: options.nintendo_layout,
        },
    );

    let generic;
    let entry: Option<&DbEntry> = if uses_database(device.technology) {
        match encoders.sdl.database().lookup(&identity.fingerprint) {
            Some(entry) => Some(entry),
            None => {
                info!(
                    "{}; using generic mapping for player {}",
                    BindingError::MissingBindingData(identity.fingerprint.to_string()),
                    device.player_index
                );
                generic = DbEntry::generic();
                Some(&generic)
            }
        }
    } else {
        None
    };

    let encode = |input: LogicalInput| match entry {
        Some(entry) => encoders.sdl.encode_entry(entry, input, device),
        None => encoders.encode(device.technology, input, device),
    };

    let ctx = DeviceContext {
        device,
        identity,
        peripheral,
    };
    let reverse = target.reverse_axes(peripheral);
    let profile = &resolved.profile;

    let mut bindings: Vec<ResolvedBinding> = target
        .device_entries(&ctx)
        .into_iter()
        .map(ResolvedBinding::from)
        .collect();

    for (input, tokens) in profile.iter() {
        for token in tokens {
            if emitted_as_reverse(input, token.as_str(), profile, &reverse) {
                continue;
            }
            let encoded = encode(input);
            if encoded.is_unbound() {
                debug!(
                    "{}",
                    BindingError::UnresolvedLogicalInput {
                        input,
                        device: identity.identity.clone(),
                    }
                );
            }
            let entry = target.entry(&ctx, token, &encoded);

            let reverse_entry = reverse
                .negative_of(token.as_str())
                .filter(|negative| owned_by_opposite(profile, input, negative))
                .and_then(|negative| {
                    let opposite = input.opposite().map(&encode).unwrap_or(Encoded::Unbound);
                    target.entry(&ctx, &NativeToken::from(negative), &opposite)
                });

            match (entry, reverse_entry) {
                (Some(entry), reverse_entry) => {
                    bindings.push(ResolvedBinding::from(entry).with_reverse(reverse_entry))
                }
                (None, Some(reverse_entry)) => bindings.push(ResolvedBinding::from(reverse_entry)),
                (None, None) => {}
            }
        }
    }

    if device.player_index == 1 {
        let composer = HotkeyComposer::new(target, &resolved.hotkey_overrides);
        bindings.extend(
            composer
                .compose(&ctx, &encode, &encoders.keyboard)
                .into_iter()
                .map(ResolvedBinding::from),
        );
    }

    Ok(DeviceBindings {
        player_index: device.player_index,
        identity: identity.clone(),
        peripheral,
        profile_name: profile.name().to_string(),
        layers: resolved.layers.clone(),
        bindings,
    })
}
