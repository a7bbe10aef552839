pub mod palette;
mod sse;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{RwLock, watch};

use crate::color::{Hsva, MixboxSpace, MixedColor, PigmentSpace, Rgb};
use crate::config::AppConfig;
use crate::dao::palette_store::PaletteStore;
use crate::services::naming::NameSlot;

pub use self::palette::{Palette, PaletteError, PigmentSwatch, RecipeEntry};
pub use self::sse::SseHub;

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Latest mix outcome, recomputed after every palette mutation and cached
/// for snapshots. Never persisted.
#[derive(Debug, Clone)]
pub struct MixState {
    /// The blended color (or the empty sentinel).
    pub color: MixedColor,
    /// Raw match score against the current target; 0 when either side is
    /// missing. Unclamped.
    pub match_percentage: f64,
    /// Resolved display name for the mixed color; empty while pending.
    pub name: String,
}

impl Default for MixState {
    fn default() -> Self {
        Self {
            color: MixedColor::EMPTY,
            match_percentage: 0.0,
            name: String::new(),
        }
    }
}

/// The user-chosen target color and its resolved display name.
#[derive(Debug, Clone)]
pub struct TargetState {
    /// Picker-native value, kept as entered.
    pub hsva: Hsva,
    /// RGB equivalent used for scoring.
    pub rgb: Rgb,
    /// Resolved display name; empty while pending.
    pub name: String,
}

/// Central application state: the palette, the latest mix outcome, the
/// target color, persistence and the SSE hub.
pub struct AppState {
    palette: RwLock<Palette>,
    mix: RwLock<MixState>,
    target: RwLock<Option<TargetState>>,
    palette_store: RwLock<Option<Arc<dyn PaletteStore>>>,
    pigment_space: Arc<dyn PigmentSpace>,
    sse: SseHub,
    degraded: watch::Sender<bool>,
    name_generations: DashMap<NameSlot, u64>,
    naming_client: reqwest::Client,
    config: AppConfig,
}

impl AppState {
    /// Construct the state with the production pigment model installed.
    ///
    /// The application starts in degraded mode until a palette store is
    /// installed, with the configured seed pigments in the palette.
    pub fn new(config: AppConfig) -> SharedState {
        Self::with_pigment_space(config, Arc::new(MixboxSpace))
    }

    /// Construct the state around an explicit pigment model. Used by tests
    /// to inject a deterministic latent space double.
    pub fn with_pigment_space(config: AppConfig, space: Arc<dyn PigmentSpace>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let palette = config.seed_palette();
        Arc::new(Self {
            palette: RwLock::new(palette),
            mix: RwLock::new(MixState::default()),
            target: RwLock::new(None),
            palette_store: RwLock::new(None),
            pigment_space: space,
            sse: SseHub::new(16),
            degraded: degraded_tx,
            name_generations: DashMap::new(),
            naming_client: reqwest::Client::new(),
            config,
        })
    }

    /// The palette, behind its single-writer lock.
    pub fn palette(&self) -> &RwLock<Palette> {
        &self.palette
    }

    /// Latest mix outcome.
    pub fn mix(&self) -> &RwLock<MixState> {
        &self.mix
    }

    /// Current target color, if one is set.
    pub fn target(&self) -> &RwLock<Option<TargetState>> {
        &self.target
    }

    /// The injected latent pigment model.
    pub fn pigment_space(&self) -> &dyn PigmentSpace {
        self.pigment_space.as_ref()
    }

    /// Obtain a handle to the current palette store, if one is installed.
    pub async fn palette_store(&self) -> Option<Arc<dyn PaletteStore>> {
        let guard = self.palette_store.read().await;
        guard.as_ref().cloned()
    }

    /// Install a palette store implementation and leave degraded mode.
    pub async fn install_palette_store(&self, store: Arc<dyn PaletteStore>) {
        {
            let mut guard = self.palette_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current palette store and enter degraded mode.
    pub async fn clear_palette_store(&self) {
        {
            let mut guard = self.palette_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag. Storage may still be installed while the
    /// supervisor is retrying a failed backend, so this tracks the last
    /// announced state, not store presence.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        if *self.degraded.borrow() == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn sse(&self) -> &SseHub {
        &self.sse
    }

    /// Generation counters guarding in-flight name lookups.
    pub fn name_generations(&self) -> &DashMap<NameSlot, u64> {
        &self.name_generations
    }

    /// Shared HTTP client for the color-name API.
    pub fn naming_client(&self) -> &reqwest::Client {
        &self.naming_client
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
