use std::{path::Path, time::Duration};

use anyhow::Context as _;

use crate::{
    animation::kind::{ActivationKind, AnimationKind, ProgressStyle},
    foundation::{
        core::IconSize,
        error::{DlIconError, DlIconResult},
    },
};

/// Auto-stop deadlines per activation kind, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KindDurations {
    pub download_ms: u64,
    pub error_ms: u64,
    pub complete_ms: u64,
    pub progress_ms: u64,
}

impl Default for KindDurations {
    fn default() -> Self {
        Self {
            download_ms: 5000,
            error_ms: 5000,
            complete_ms: 5000,
            progress_ms: 5000,
        }
    }
}

impl KindDurations {
    pub fn for_kind(&self, kind: ActivationKind) -> Duration {
        let ms = match kind {
            ActivationKind::Download => self.download_ms,
            ActivationKind::Error => self.error_ms,
            ActivationKind::Complete => self.complete_ms,
            ActivationKind::Progress(_) => self.progress_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn for_animation(&self, kind: AnimationKind) -> Duration {
        let ms = match kind {
            AnimationKind::Download => self.download_ms,
            AnimationKind::Error => self.error_ms,
            AnimationKind::Complete => self.complete_ms,
            AnimationKind::ProgressArc | AnimationKind::ProgressFill => self.progress_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Timing and raster options. Every value only changes smoothness/timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimatorConfig {
    pub frames_per_loop: u32,
    pub tick_interval_ms: u64,
    pub fade_interval_ms: u64,
    pub fade_steps: u32,
    pub transition_steps: u32,
    pub durations: KindDurations,
    pub icon_px: u16,
    pub progress_style: ProgressStyle,
    pub particle_seed: u64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            frames_per_loop: 60,
            tick_interval_ms: 50,
            fade_interval_ms: 50,
            fade_steps: 10,
            transition_steps: 10,
            durations: KindDurations::default(),
            icon_px: 32,
            progress_style: ProgressStyle::Fill,
            particle_seed: 0x5EED_D0E5_1C0B_u64,
        }
    }
}

impl AnimatorConfig {
    pub fn from_json_str(s: &str) -> DlIconResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| DlIconError::validation(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> DlIconResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Apply `DLICON_*` environment overrides, then re-validate.
    pub fn with_env_overrides(self) -> DlIconResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> DlIconResult<Self> {
        fn parse<T: std::str::FromStr>(key: &str, raw: &str) -> DlIconResult<T> {
            raw.trim()
                .parse::<T>()
                .map_err(|_| DlIconError::validation(format!("{key}: cannot parse '{raw}'")))
        }

        if let Some(v) = lookup("DLICON_TICK_MS") {
            self.tick_interval_ms = parse("DLICON_TICK_MS", &v)?;
        }
        if let Some(v) = lookup("DLICON_FADE_MS") {
            self.fade_interval_ms = parse("DLICON_FADE_MS", &v)?;
        }
        if let Some(v) = lookup("DLICON_ICON_PX") {
            self.icon_px = parse("DLICON_ICON_PX", &v)?;
        }
        if let Some(v) = lookup("DLICON_PROGRESS_STYLE") {
            self.progress_style = v.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> DlIconResult<()> {
        if self.frames_per_loop == 0 {
            return Err(DlIconError::validation("frames_per_loop must be > 0"));
        }
        if self.tick_interval_ms == 0 {
            return Err(DlIconError::validation("tick_interval_ms must be > 0"));
        }
        if self.fade_interval_ms == 0 {
            return Err(DlIconError::validation("fade_interval_ms must be > 0"));
        }
        if self.fade_steps == 0 {
            return Err(DlIconError::validation("fade_steps must be > 0"));
        }
        if self.transition_steps == 0 {
            return Err(DlIconError::validation("transition_steps must be > 0"));
        }
        IconSize::new(self.icon_px)?;
        Ok(())
    }

    pub fn icon_size(&self) -> IconSize {
        IconSize::new(self.icon_px).unwrap_or_default()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fade_interval(&self) -> Duration {
        Duration::from_millis(self.fade_interval_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
