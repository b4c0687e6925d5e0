//! Geometry descriptors produced by the generator.
//!
//! A descriptor is plain data: where a primitive sits, how big it is and what
//! it looks like. Nothing in here knows about a rendering backend; the host
//! turns descriptors into meshes (or into [`Instance`]s of unit primitives).

use cgmath::Vector3;
use serde::Serialize;

use crate::data_structures::instance::Instance;

/// Surface appearance of a primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// 0xRRGGBB
    Color(u32),
    /// Path of an image asset, resolved by the host.
    Texture(String),
}

/// Box dimensions in object-space meters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            anyhow::ensure!(
                value.is_finite() && value > 0.0,
                "house {} must be a positive number, got {}",
                name,
                value
            );
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Cuboid(Dimensions),
    Cylinder { radius: f32, height: f32 },
    /// A flat rectangle, e.g. flag fabric.
    Panel { width: f32, height: f32 },
}

impl Shape {
    /// Size of the shape's bounding box.
    pub fn extent(&self) -> Vector3<f32> {
        match *self {
            Shape::Cuboid(d) => Vector3::new(d.width, d.height, d.depth),
            Shape::Cylinder { radius, height } => Vector3::new(radius * 2.0, height, radius * 2.0),
            // panels are rendered as quads, a zero depth would collapse the normal matrix
            Shape::Panel { width, height } => Vector3::new(width, height, 1.0),
        }
    }
}

/// One placed primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Descriptor {
    pub position: Vector3<f32>,
    pub shape: Shape,
    pub material: Material,
}

impl Descriptor {
    pub fn cuboid(position: Vector3<f32>, dimensions: Dimensions, material: Material) -> Self {
        Self {
            position,
            shape: Shape::Cuboid(dimensions),
            material,
        }
    }

    /// Box dimensions if this is a cuboid.
    pub fn dimensions(&self) -> Option<Dimensions> {
        match self.shape {
            Shape::Cuboid(d) => Some(d),
            _ => None,
        }
    }

    pub fn to_instance(&self) -> Instance {
        Instance::from(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HouseDescriptor {
    /// Base of the house: center of its footprint at ground level.
    pub position: Vector3<f32>,
    pub dimensions: Dimensions,
    pub walls: Vec<Descriptor>,
    pub door: Descriptor,
    pub windows: [Descriptor; 2],
    pub roof: Descriptor,
}

impl HouseDescriptor {
    /// All parts of the house in draw order: walls, door, windows, roof.
    pub fn parts(&self) -> impl Iterator<Item = &Descriptor> {
        self.walls
            .iter()
            .chain(std::iter::once(&self.door))
            .chain(self.windows.iter())
            .chain(std::iter::once(&self.roof))
    }

    pub fn instances(&self) -> Vec<Instance> {
        self.parts().map(Instance::from).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlagDescriptor {
    pub pole: Descriptor,
    pub fabric: Descriptor,
}

impl FlagDescriptor {
    pub fn instances(&self) -> Vec<Instance> {
        vec![self.pole.to_instance(), self.fabric.to_instance()]
    }
}
