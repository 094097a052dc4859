//! Explorer state shared by the CLI and the web server.
//!
//! Holds the user's selections (base color, harmony rule, canvas seed) and the
//! AI panel. Palette and tiles are derived on demand and never stored, so they
//! always reflect the current selections.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{hex_to_hsl, HarmonyRule, HexColor, Hsl, Palette, Tile};
use crate::services::harmony::build_palette;
use crate::services::{Suggestion, SuggestionError, TileGenerator};

/// Status text while a suggestion request is running.
pub const LOADING_MESSAGE: &str = "Consulting the AI…";

/// Message shown when a suggestion request fails for any reason.
pub const FAILURE_MESSAGE: &str = "Could not generate a palette. Try another description.";

/// Notice shown when no API key is configured.
pub const CREDENTIAL_NOTICE: &str = "API key not detected. AI suggestions are disabled.";

/// Why a suggestion request was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuggestionRejected {
    /// The mood text was blank
    #[error("Mood description is empty")]
    EmptyPrompt,
    /// No API key is configured
    #[error("AI suggestions are disabled: no API key configured")]
    Disabled,
    /// Another request has not finished yet
    #[error("A suggestion is already being generated")]
    InFlight,
}

#[derive(Debug, Clone, Default)]
struct AiPanel {
    enabled: bool,
    loading: bool,
    message: Option<String>,
    notice_pending: bool,
    notice_shown: bool,
}

/// The explorer's current selections.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    base: Hsl,
    harmony: HarmonyRule,
    seed: u64,
    generator: TileGenerator,
    ai: AiPanel,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new(Hsl::default(), HarmonyRule::default(), TileGenerator::default(), false)
    }
}

impl ExplorerState {
    /// Creates the explorer with starting selections.
    ///
    /// When `ai_enabled` is false the credential notice is queued for
    /// [`take_credential_notice`](Self::take_credential_notice).
    #[must_use]
    pub fn new(base: Hsl, harmony: HarmonyRule, generator: TileGenerator, ai_enabled: bool) -> Self {
        Self {
            base,
            harmony,
            seed: 0,
            generator,
            ai: AiPanel {
                enabled: ai_enabled,
                notice_pending: !ai_enabled,
                ..AiPanel::default()
            },
        }
    }

    /// Current base color.
    #[must_use]
    pub const fn base(&self) -> Hsl {
        self.base
    }

    /// Current harmony rule.
    #[must_use]
    pub const fn harmony(&self) -> HarmonyRule {
        self.harmony
    }

    /// Current canvas seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Tile generator in use.
    #[must_use]
    pub const fn generator(&self) -> &TileGenerator {
        &self.generator
    }

    /// Palette for the current base and rule.
    #[must_use]
    pub fn palette(&self) -> Palette {
        build_palette(self.base, self.harmony)
    }

    /// Hex colors of the current palette.
    #[must_use]
    pub fn hex_colors(&self) -> Vec<HexColor> {
        self.palette().hex_colors()
    }

    /// Tiles for the current palette size and seed.
    ///
    /// Changing the base color keeps the tiles; changing to a rule with a
    /// different color count or shuffling redraws them.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.generator
            .generate_seeded(self.harmony.color_count(), self.seed)
    }

    /// Sets the base color.
    pub fn set_base(&mut self, base: Hsl) {
        self.base = Hsl::new(base.h, base.s, base.l);
    }

    /// Sets the base color from a hex string; malformed input becomes black.
    pub fn set_base_hex(&mut self, hex: &str) {
        self.set_base(hex_to_hsl(hex));
    }

    /// Sets the harmony rule.
    pub fn set_harmony(&mut self, harmony: HarmonyRule) {
        self.harmony = harmony;
    }

    /// Sets the canvas seed directly.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Redraws the canvas with the next seed.
    pub fn shuffle(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        debug!("Shuffled canvas to seed {}", self.seed);
    }

    /// True when AI suggestions can be requested.
    #[must_use]
    pub const fn ai_enabled(&self) -> bool {
        self.ai.enabled
    }

    /// True while a suggestion request is running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.ai.loading
    }

    /// The last AI message, if any.
    #[must_use]
    pub fn ai_message(&self) -> Option<&str> {
        self.ai.message.as_deref()
    }

    /// Starts a suggestion request, returning the trimmed mood to send.
    ///
    /// Clears the previous AI message and sets the loading flag. The caller
    /// must pass the request's outcome to
    /// [`finish_suggestion`](Self::finish_suggestion).
    ///
    /// # Errors
    ///
    /// Rejects a blank mood, a disabled AI panel, or a second request while one
    /// is in flight. The state is unchanged on rejection.
    pub fn begin_suggestion(&mut self, mood: &str) -> Result<String, SuggestionRejected> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(SuggestionRejected::EmptyPrompt);
        }
        if !self.ai.enabled {
            return Err(SuggestionRejected::Disabled);
        }
        if self.ai.loading {
            return Err(SuggestionRejected::InFlight);
        }

        self.ai.loading = true;
        self.ai.message = None;
        Ok(mood.to_string())
    }

    /// Applies the outcome of a suggestion request and clears the loading flag.
    pub fn finish_suggestion(&mut self, result: Result<Suggestion, SuggestionError>) {
        self.ai.loading = false;

        match result {
            Ok(suggestion) => {
                self.set_base_hex(suggestion.base_hex.as_str());
                self.harmony = suggestion.harmony;
                self.ai.message = Some(suggestion.description);
            }
            Err(e) => {
                warn!("Suggestion failed: {}", e);
                if e.is_missing_credential() {
                    self.ai.enabled = false;
                    self.ai.notice_pending = !self.ai.notice_shown;
                }
                self.ai.message = Some(FAILURE_MESSAGE.to_string());
            }
        }
    }

    /// Abandons the running request without changing the palette.
    ///
    /// Used when the request is dropped before it produced an outcome, so a
    /// later request is not rejected as in flight.
    pub fn cancel_suggestion(&mut self) {
        if self.ai.loading {
            self.ai.loading = false;
            debug!("Suggestion request abandoned");
        }
    }

    /// Returns the "no API key" notice the first time it is asked for.
    pub fn take_credential_notice(&mut self) -> Option<&'static str> {
        if self.ai.notice_pending {
            self.ai.notice_pending = false;
            self.ai.notice_shown = true;
            Some(CREDENTIAL_NOTICE)
        } else {
            None
        }
    }

    /// One-line status: the loading text, the last AI message, or the color count.
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.ai.loading {
            LOADING_MESSAGE.to_string()
        } else if let Some(message) = &self.ai.message {
            message.clone()
        } else {
            format!(
                "{} colors distributed proportionally",
                self.harmony.color_count()
            )
        }
    }

    /// Serializable view of everything the UI renders.
    #[must_use]
    pub fn snapshot(&self) -> ExplorerSnapshot {
        let palette = self.palette();
        ExplorerSnapshot {
            base: self.base,
            base_hex: self.base.to_hex(),
            harmony: self.harmony,
            seed: self.seed,
            depth: self.generator.params().depth,
            colors: palette.hex_colors(),
            tiles: self.tiles(),
            status: self.status_line(),
            ai_enabled: self.ai.enabled,
            loading: self.ai.loading,
            message: self.ai.message.clone(),
        }
    }
}

/// Rendered explorer state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerSnapshot {
    /// Base color
    pub base: Hsl,
    /// Base color as hex
    pub base_hex: HexColor,
    /// Harmony rule
    pub harmony: HarmonyRule,
    /// Canvas seed
    pub seed: u64,
    /// Subdivision depth
    pub depth: u32,
    /// Palette colors in order
    pub colors: Vec<HexColor>,
    /// Canvas tiles
    pub tiles: Vec<Tile>,
    /// Status line
    pub status: String,
    /// Whether AI suggestions are available
    pub ai_enabled: bool,
    /// Whether a suggestion is running
    pub loading: bool,
    /// Last AI message
    pub message: Option<String>,
}
