use crate::constants::MIN_BUILDING_SIDE;
use crate::error::{GenerationError, Result};
use crate::types::GenerationRequest;

use serde::Serialize;

/// A named bundle of generation defaults and tuning parameters.
///
/// The registry is static: presets are compiled in and never change at
/// runtime.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Balanced mix of roads and buildings.
    #[default]
    Outpost,
    /// Road-heavy map with a few scattered structures.
    Crossroads,
    /// Densely built-up settlement.
    Township,
    /// Sparse wasteland with wide clearances.
    Badlands,
}

pub struct ThemeRegistry;

impl ThemeRegistry {
    /// Resolves a preset name to its theme.
    pub fn resolve(name: &str) -> Result<Theme> {
        Ok(match name {
            "outpost" => Theme::Outpost,
            "crossroads" => Theme::Crossroads,
            "township" => Theme::Township,
            "badlands" => Theme::Badlands,
            _ => return Err(GenerationError::UnknownPreset(name.to_owned())),
        })
    }

    pub fn preset_names() -> [&'static str; 4] {
        ["outpost", "crossroads", "township", "badlands"]
    }
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Outpost => "outpost",
            Theme::Crossroads => "crossroads",
            Theme::Township => "township",
            Theme::Badlands => "badlands",
        }
    }

    /// A fully-populated request for this preset; callers override fields
    /// before handing it to a session.
    pub fn request_defaults(self) -> GenerationRequest {
        let (road_count, building_count) = match self {
            Theme::Outpost => (96, 6),
            Theme::Crossroads => (160, 4),
            Theme::Township => (110, 10),
            Theme::Badlands => (40, 3),
        };

        GenerationRequest {
            width: 48,
            height: 48,
            road_count,
            building_count,
            theme: self,
            seed: None,
            step_budget: None,
        }
    }

    pub(crate) fn config(self) -> ThemeConfig {
        let mut base = ThemeConfig::default();

        match self {
            Theme::Outpost => {}
            Theme::Crossroads => {
                base.building_side_divisor = 9;
                base.building_max_side = 7;
            }
            Theme::Township => {
                base.building_side_divisor = 6;
                base.building_max_side = 11;
            }
            Theme::Badlands => {
                base.margin = 2;
                base.building_side_divisor = 5;
                base.building_max_side = 13;
            }
        }

        base
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ThemeConfig {
    // Minimum separation, in cells, between a building footprint and any
    // other footprint or road cell.
    pub margin: u32,
    // Target building sides are capped at min(width, height) / divisor, so
    // small grids keep enough slack to stay packable.
    pub building_side_divisor: u32,
    pub building_max_side: u32,
    // Default step budget is this factor times the grid area.
    pub step_budget_factor: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            margin: 1,
            building_side_divisor: 8,
            building_max_side: 9,
            step_budget_factor: 4,
        }
    }
}

impl ThemeConfig {
    /// Largest target side a building may draw on a grid of the given size.
    pub fn target_side_limit(&self, width: u32, height: u32) -> u32 {
        (width.min(height) / self.building_side_divisor)
            .clamp(MIN_BUILDING_SIDE, self.building_max_side)
    }

    pub fn default_step_budget(&self, area: u32) -> u32 {
        self.step_budget_factor.saturating_mul(area)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolve_known_presets() {
        for name in ThemeRegistry::preset_names() {
            let theme = ThemeRegistry::resolve(name).unwrap();
            assert_eq!(theme.name(), name);
        }
    }

    #[test]
    fn test_resolve_unknown_preset() {
        let result = ThemeRegistry::resolve("metropolis");

        assert_eq!(
            result,
            Err(GenerationError::UnknownPreset("metropolis".to_owned()))
        );
    }

    #[test]
    fn test_side_limit_floors_at_minimum() {
        let config = Theme::Outpost.config();

        // 10 / 8 rounds down below the minimum side; the cap floors it.
        assert_eq!(config.target_side_limit(10, 10), MIN_BUILDING_SIDE);
        assert_eq!(config.target_side_limit(48, 48), 6);
        assert_eq!(config.target_side_limit(256, 256), config.building_max_side);
    }
}
