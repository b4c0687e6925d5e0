//! Procedural Sidi Bou Said neighborhood generator.
//!
//! The generator emits white houses with blue doors and windows, terracotta
//! roofs and Tunisian flag poles. Houses of a neighborhood are laid out on a
//! square grid of `ceil(sqrt(n))` columns around a center point; the size of
//! each house and whether it carries a flag are drawn from the generator's
//! random source.
//!
//! The generator keeps everything it produced in insertion order. Use
//! [`Generator::seeded`] when the layout has to be reproducible.

use cgmath::Vector3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    config::NeighborhoodConfig,
    context::NeighborhoodSource,
    data_structures::descriptor::{
        Descriptor, Dimensions, FlagDescriptor, HouseDescriptor, Material, Shape,
    },
};

/// Fixed colors and assets of the Sidi Bou Said style.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub house_color: u32,
    pub door_color: u32,
    pub window_color: u32,
    pub roof_color: u32,
    pub flag_texture: &'static str,
}

pub const PALETTE: Palette = Palette {
    house_color: 0xFFFFFF,
    door_color: 0x0066CC,
    window_color: 0x0066CC,
    roof_color: 0xFF4444,
    flag_texture: "assets/flags/drapeau-tunisie.png",
};

impl Default for Palette {
    fn default() -> Self {
        PALETTE
    }
}

pub const DEFAULT_SPACING: f32 = 20.0;
pub const DEFAULT_HOUSE: Dimensions = Dimensions {
    width: 10.0,
    height: 12.0,
    depth: 10.0,
};

const POLE_COLOR: u32 = 0x888888;
const POLE_RADIUS: f32 = 0.1;
const POLE_HEIGHT: f32 = 10.0;
const FLAG_CHANCE: f64 = 0.5;

/// Snapshot of everything a generator produced, plus its palette.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Export {
    pub houses: Vec<HouseDescriptor>,
    pub flags: Vec<FlagDescriptor>,
    #[serde(rename = "config")]
    pub palette: Palette,
}

impl Export {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Grid cell of the `index`-th house for a layout of `num_houses`.
///
/// Returns the world `(x, z)` of the house base.
pub fn grid_position(
    index: usize,
    num_houses: usize,
    center_x: f32,
    center_z: f32,
    spacing: f32,
) -> (f32, f32) {
    let columns = grid_columns(num_houses);
    let row = (index / columns) as f32;
    let col = (index % columns) as f32;
    let half = columns as f32 / 2.0;
    (
        center_x + (col - half) * spacing,
        center_z + (row - half) * spacing,
    )
}

/// Number of columns (and at most rows) of the square layout.
pub fn grid_columns(num_houses: usize) -> usize {
    ((num_houses as f64).sqrt().ceil() as usize).max(1)
}

pub struct Generator<R: Rng = StdRng> {
    rng: R,
    spacing: f32,
    houses: Vec<HouseDescriptor>,
    flags: Vec<FlagDescriptor>,
}

impl Generator<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Entropy-seeded generator using the configured spacing.
    pub fn from_config(config: &NeighborhoodConfig) -> anyhow::Result<Self> {
        Self::new().with_spacing(config.spacing)
    }
}

impl Default for Generator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            spacing: DEFAULT_SPACING,
            houses: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn with_spacing(mut self, spacing: f32) -> anyhow::Result<Self> {
        anyhow::ensure!(
            spacing.is_finite() && spacing > 0.0,
            "spacing must be a positive number, got {}",
            spacing
        );
        self.spacing = spacing;
        Ok(self)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn houses(&self) -> &[HouseDescriptor] {
        &self.houses
    }

    pub fn flags(&self) -> &[FlagDescriptor] {
        &self.flags
    }

    pub fn generate_default_house(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
    ) -> anyhow::Result<&HouseDescriptor> {
        let Dimensions {
            width,
            height,
            depth,
        } = DEFAULT_HOUSE;
        self.generate_house(x, y, z, width, height, depth)
    }

    /// Append a house whose footprint is centered on `(x, z)` with its base at `y`.
    pub fn generate_house(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
    ) -> anyhow::Result<&HouseDescriptor> {
        let dimensions = Dimensions::new(width, height, depth);
        dimensions.validate()?;
        let position = finite_position(x, y, z)?;
        self.houses.push(build_house(position, dimensions));
        Ok(&self.houses[self.houses.len() - 1])
    }

    /// Append a flag pole standing at `(x, y, z)`.
    pub fn generate_flag(&mut self, x: f32, y: f32, z: f32) -> anyhow::Result<&FlagDescriptor> {
        let position = finite_position(x, y, z)?;
        self.flags.push(build_flag(position));
        Ok(&self.flags[self.flags.len() - 1])
    }

    pub fn generate_neighborhood(
        &mut self,
        center_x: f32,
        center_z: f32,
        num_houses: usize,
    ) -> anyhow::Result<()> {
        anyhow::ensure!(
            center_x.is_finite() && center_z.is_finite(),
            "neighborhood center ({}, {}) must be finite",
            center_x,
            center_z
        );
        self.houses.reserve(num_houses);
        for i in 0..num_houses {
            let (x, z) = grid_position(i, num_houses, center_x, center_z, self.spacing);
            let y = 0.0;

            let width = self.rng.gen_range(8.0..12.0);
            let height = self.rng.gen_range(10.0..16.0);
            let depth = self.rng.gen_range(8.0..12.0);

            self.generate_house(x, y, z, width, height, depth)?;

            if self.rng.gen_bool(FLAG_CHANCE) {
                self.generate_flag(x + width / 2.0, y, z - depth / 2.0)?;
            }
        }
        log::debug!(
            "neighborhood of {} houses around ({}, {}), {} flags in total",
            num_houses,
            center_x,
            center_z,
            self.flags.len()
        );
        Ok(())
    }

    pub fn export(&self) -> Export {
        Export {
            houses: self.houses.clone(),
            flags: self.flags.clone(),
            palette: PALETTE,
        }
    }
}

impl<R: Rng> NeighborhoodSource for Generator<R> {
    fn generate_neighborhood(
        &mut self,
        center_x: f32,
        center_z: f32,
        num_houses: usize,
    ) -> anyhow::Result<()> {
        Generator::generate_neighborhood(self, center_x, center_z, num_houses)
    }

    fn houses(&self) -> &[HouseDescriptor] {
        &self.houses
    }

    fn flags(&self) -> &[FlagDescriptor] {
        &self.flags
    }

    fn export(&self) -> Export {
        Generator::export(self)
    }
}

fn finite_position(x: f32, y: f32, z: f32) -> anyhow::Result<Vector3<f32>> {
    anyhow::ensure!(
        x.is_finite() && y.is_finite() && z.is_finite(),
        "position ({}, {}, {}) must be finite",
        x,
        y,
        z
    );
    Ok(Vector3::new(x, y, z))
}

fn build_house(base: Vector3<f32>, dimensions: Dimensions) -> HouseDescriptor {
    let Dimensions {
        width,
        height,
        depth,
    } = dimensions;
    let Vector3 { x, y, z } = base;

    let walls = vec![Descriptor::cuboid(
        Vector3::new(x, y + height / 2.0, z),
        dimensions,
        Material::Color(PALETTE.house_color),
    )];

    // the door sits on the front face, offset by half the width
    let door = Descriptor::cuboid(
        Vector3::new(x, y + 2.0, z + width / 2.0 - 0.5),
        Dimensions::new(2.0, 4.0, 0.2),
        Material::Color(PALETTE.door_color),
    );

    let window = |i: f32| {
        Descriptor::cuboid(
            Vector3::new(x - width / 4.0 + i * width / 2.0, y + height * 0.6, z + depth / 2.0),
            Dimensions::new(2.0, 3.0, 0.1),
            Material::Color(PALETTE.window_color),
        )
    };
    let windows = [window(0.0), window(1.0)];

    let roof = Descriptor::cuboid(
        Vector3::new(x, y + height, z),
        Dimensions::new(width + 1.0, 1.0, depth + 1.0),
        Material::Color(PALETTE.roof_color),
    );

    HouseDescriptor {
        position: base,
        dimensions,
        walls,
        door,
        windows,
        roof,
    }
}

fn build_flag(base: Vector3<f32>) -> FlagDescriptor {
    FlagDescriptor {
        pole: Descriptor {
            position: Vector3::new(base.x, base.y + POLE_HEIGHT / 2.0, base.z),
            shape: Shape::Cylinder {
                radius: POLE_RADIUS,
                height: POLE_HEIGHT,
            },
            material: Material::Color(POLE_COLOR),
        },
        fabric: Descriptor {
            position: Vector3::new(base.x + 1.5, base.y + 8.0, base.z),
            shape: Shape::Panel {
                width: 3.0,
                height: 2.0,
            },
            material: Material::Texture(PALETTE.flag_texture.to_string()),
        },
    }
}
