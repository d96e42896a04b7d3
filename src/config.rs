//! Page-level effect configuration.
//!
//! Every section uses `#[serde(default)]`, so a page only needs to spell
//! out what it changes. A section that is present fills its missing fields
//! from that section type's own `Default`, so a partial `contact_scene`
//! starts from the plain spiral and has to restate `torus`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Rgb, CYAN};
use crate::fx2d::{ChartOptions, NetworkOptions, RainOptions, ShapesOptions, WaveOptions};
use crate::scene::{GridOptions, OrbitOptions, SpiralOptions, StarFieldOptions};
use crate::widgets::reveal::default_rules;
use crate::widgets::{
    BackToTopOptions, CarouselOptions, CounterOptions, ParallaxOptions, PreloaderOptions, RevealRule, TiltOptions,
    TrailOptions, TypedOptions,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid effect config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeroKind {
    /// Swirl around a torus knot.
    #[default]
    Spiral,
    /// Icosahedron with an orbiting ship.
    Orbit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub kind: HeroKind,
    pub spiral: SpiralOptions,
    pub orbit: OrbitOptions,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            kind: HeroKind::Spiral,
            spiral: SpiralOptions {
                torus: true,
                torus_color: CYAN,
                particle_color: Rgb::hex(0xff2d95),
                swirl_count: 700,
                ..SpiralOptions::default()
            },
            orbit: OrbitOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    pub hero: HeroConfig,
    pub contact_scene: SpiralOptions,
    /// Skills and portfolio backgrounds.
    pub section_spiral: SpiralOptions,
    pub stars: StarFieldOptions,
    pub grid: GridOptions,
    pub network: NetworkOptions,
    pub shapes: ShapesOptions,
    pub waves: WaveOptions,
    pub rain: RainOptions,
    pub chart: ChartOptions,
    pub typed: TypedOptions,
    pub counters: CounterOptions,
    pub carousel: CarouselOptions,
    pub back_to_top: BackToTopOptions,
    pub parallax: ParallaxOptions,
    pub trail: TrailOptions,
    pub tilt: TiltOptions,
    pub reveal: Vec<RevealRule>,
    pub preloader: PreloaderOptions,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            hero: HeroConfig::default(),
            contact_scene: SpiralOptions {
                torus: true,
                torus_radius: 1.8,
                swirl_count: 700,
                point_size: 0.075,
                ..SpiralOptions::default()
            },
            section_spiral: SpiralOptions {
                particle_color: CYAN,
                swirl_count: 500,
                ..SpiralOptions::default()
            },
            stars: StarFieldOptions::default(),
            grid: GridOptions::default(),
            network: NetworkOptions::default(),
            shapes: ShapesOptions::default(),
            waves: WaveOptions::default(),
            rain: RainOptions::default(),
            chart: ChartOptions::default(),
            typed: TypedOptions::default(),
            counters: CounterOptions::default(),
            carousel: CarouselOptions::default(),
            back_to_top: BackToTopOptions::default(),
            parallax: ParallaxOptions::default(),
            trail: TrailOptions::default(),
            tilt: TiltOptions::default(),
            reveal: default_rules(),
            preloader: PreloaderOptions::default(),
        }
    }
}

impl FxConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(FxConfig::from_json("{}").unwrap(), FxConfig::default());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = FxConfig::from_json(
            r##"{
                "hero": { "kind": "orbit" },
                "typed": { "texts": ["one", "two"] },
                "network": { "color": "#ff2d95" }
            }"##,
        )
        .unwrap();
        assert_eq!(cfg.hero.kind, HeroKind::Orbit);
        assert_eq!(cfg.hero.spiral.swirl_count, 700);
        assert_eq!(cfg.typed.texts, ["one", "two"]);
        assert_eq!(cfg.typed.speed_ms, 80);
        assert_eq!(cfg.network.color, Rgb::hex(0xff2d95));
        assert_eq!(cfg.network.link_distance, 120.0);
        assert_eq!(cfg.contact_scene.torus_radius, 1.8);
    }

    #[test]
    fn bad_color_is_an_error() {
        let err = FxConfig::from_json(r#"{ "shapes": { "colors": ["cyan"] } }"#).unwrap_err();
        assert!(err.to_string().contains("invalid effect config"));
    }
}
