//! Icon Resolution
//!
//! Maps weather condition codes and classification results to display
//! asset references. The dashboard ships with the Meteocons icon set;
//! [`MeteoconsIcons`] knows its file names, and anything implementing
//! [`IconResolver`] can stand in for it.
//!
//! ```text
//! "04d" ──► ConditionCode { group: 4, daytime: true } ──► overcast-day.svg
//! ```
//!
//! Condition groups without artwork resolve to `None`; panels then show no
//! icon rather than a wrong one.

use std::fmt;

use serde::Serialize;

use crate::classify::AlertLevel;
use crate::constants::defaults::DEFAULT_ICON_BASE;
use crate::constants::thresholds::UV_ICON_MAX_INDEX;

/// Weather condition code, two digits plus `d` (day) or `n` (night)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionCode {
    group: u8,
    daytime: bool,
}

impl ConditionCode {
    /// Parse a code such as `"01d"`. Returns `None` when malformed.
    pub fn parse(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
            return None;
        }

        let daytime = match bytes[2] {
            b'd' => true,
            b'n' => false,
            _ => return None,
        };
        let group = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        Some(Self { group, daytime })
    }

    /// Numeric condition group, e.g. 4 for "04d"
    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn is_daytime(&self) -> bool {
        self.daytime
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{}", self.group, if self.daytime { 'd' } else { 'n' })
    }
}

/// Reference to a display asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Condition code to asset mapping
pub trait IconResolver: Send + Sync {
    /// Asset for a condition code; stable per code
    fn resolve(&self, code: &ConditionCode) -> Option<IconRef>;

    /// Parse and resolve a raw code string
    fn resolve_str(&self, code: &str) -> Option<IconRef> {
        ConditionCode::parse(code).and_then(|code| self.resolve(&code))
    }
}

/// Meteocons asset names, relative to an icon base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeteoconsIcons {
    base: String,
}

impl Default for MeteoconsIcons {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_BASE)
    }
}

impl MeteoconsIcons {
    /// Resolver rooted at `base`; a trailing slash is ignored
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn asset(&self, name: &str) -> IconRef {
        IconRef(format!("{}/{}.svg", self.base, name))
    }

    fn condition_asset(code: &ConditionCode) -> Option<&'static str> {
        let name = match (code.group, code.daytime) {
            (1, true) => "clear-day",
            (1, false) => "clear-night",
            (2, true) => "partly-cloudy-day",
            (2, false) => "partly-cloudy-night",
            (3, _) => "cloudy",
            (4, true) => "overcast-day",
            (4, false) => "overcast-night",
            (9, true) => "overcast-day-drizzle",
            (9, false) => "overcast-night-drizzle",
            (10, true) => "overcast-day-rain",
            (10, false) => "overcast-night-rain",
            (11, true) => "thunderstorms-day-extreme",
            (11, false) => "thunderstorms-night-extreme",
            (13, true) => "partly-cloudy-day-snow",
            (13, false) => "partly-cloudy-night-snow",
            (50, _) => "mist",
            _ => return None,
        };
        Some(name)
    }

    /// Severity indicator for an alert level
    pub fn alert(&self, level: AlertLevel) -> IconRef {
        self.asset(level.indicator())
    }

    /// UV artwork for an icon index; indices above the artwork range clamp
    pub fn uv_index(&self, icon_index: u8) -> IconRef {
        match icon_index.min(UV_ICON_MAX_INDEX) {
            0 => self.asset("uv-index"),
            index => self.asset(&format!("uv-index-{}", index)),
        }
    }

    pub fn compass(&self) -> IconRef {
        self.asset("compass")
    }

    pub fn sunrise(&self) -> IconRef {
        self.asset("sunrise")
    }

    pub fn sunset(&self) -> IconRef {
        self.asset("sunset")
    }

    /// Generic cloud artwork shown next to cloudiness
    pub fn cloudy(&self) -> IconRef {
        self.asset("cloudy")
    }

    /// Generic rain artwork shown next to the rain amount
    pub fn rain(&self) -> IconRef {
        self.asset("rain")
    }
}

impl IconResolver for MeteoconsIcons {
    fn resolve(&self, code: &ConditionCode) -> Option<IconRef> {
        Self::condition_asset(code).map(|name| self.asset(name))
    }
}
