//! Decorative globe: scene description, geometry and the frame session.
//! Nothing here touches WebGL; the browser surface lives in the frontend.

pub mod mesh;
pub mod session;

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

pub const GLOBE_RADIUS: f32 = 2.0;
pub const ATMOSPHERE_RADIUS: f32 = GLOBE_RADIUS * 1.1;
pub const MARKER_RADIUS: f32 = 0.05;

pub const EARTH_SPIN_PER_FRAME: f32 = 0.002;
pub const ATMOSPHERE_SPIN_PER_FRAME: f32 = 0.001;

pub const SPHERE_SEGMENTS: u16 = 64;
pub const MARKER_SEGMENTS: u16 = 16;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GeoLocation {
    pub latitude: f32,
    pub longitude: f32,
    pub label: &'static str,
}

pub const LOCATIONS: [GeoLocation; 6] = [
    GeoLocation { latitude: 40.7128, longitude: -74.0060, label: "New York" },
    GeoLocation { latitude: 51.5074, longitude: -0.1278, label: "London" },
    GeoLocation { latitude: 43.6532, longitude: -79.3832, label: "Toronto" },
    GeoLocation { latitude: -33.8688, longitude: 151.2093, label: "Sydney" },
    GeoLocation { latitude: 52.5200, longitude: 13.4050, label: "Berlin" },
    GeoLocation { latitude: -36.8485, longitude: 174.7633, label: "Auckland" },
];

/// Latitude/longitude in degrees to a point on a sphere of `radius`.
/// The sign convention determines where markers land on the texture
/// meridian and must stay as is.
pub fn project(latitude: f32, longitude: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - latitude) * (PI / 180.0);
    let theta = (longitude + 180.0) * (PI / 180.0);

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Material {
    pub color: [f32; 3],
    pub opacity: f32,
}

impl Material {
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

pub const EARTH_MATERIAL: Material = Material { color: [0.118, 0.227, 0.541], opacity: 1.0 };
pub const ATMOSPHERE_MATERIAL: Material = Material { color: [0.376, 0.647, 0.980], opacity: 0.15 };
pub const MARKER_MATERIAL: Material = Material { color: [0.976, 0.451, 0.086], opacity: 1.0 };

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Light {
    Ambient { color: [f32; 3], intensity: f32 },
    Directional { color: [f32; 3], intensity: f32, direction: Vec3 },
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Camera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 1_000.0,
            position: Vec3::new(0.0, 0.0, 6.0),
        }
    }
}

impl Camera {
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        );
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        projection * view
    }
}

/// Rotation angles advanced once per frame, each wrapped to `[0, 2π)`.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Spin {
    pub earth: f32,
    pub atmosphere: f32,
}

impl Spin {
    pub fn advance(&mut self) {
        self.earth = (self.earth + EARTH_SPIN_PER_FRAME).rem_euclid(TAU);
        self.atmosphere = (self.atmosphere + ATMOSPHERE_SPIN_PER_FRAME).rem_euclid(TAU);
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Marker {
    pub location: GeoLocation,
    pub position: Vec3,
}

#[derive(Clone, PartialEq, Debug)]
pub struct GlobeScene {
    pub markers: Vec<Marker>,
    pub lights: [Light; 2],
    pub camera: Camera,
    pub spin: Spin,
}

impl GlobeScene {
    pub fn new(locations: &[GeoLocation]) -> Self {
        let markers = locations
            .iter()
            .map(|location| Marker {
                location: *location,
                position: project(location.latitude, location.longitude, GLOBE_RADIUS),
            })
            .collect();

        Self {
            markers,
            lights: [
                Light::Ambient { color: [1.0, 1.0, 1.0], intensity: 0.4 },
                Light::Directional {
                    color: [1.0, 1.0, 1.0],
                    intensity: 1.0,
                    direction: Vec3::new(5.0, 3.0, 5.0).normalize(),
                },
            ],
            camera: Camera::default(),
            spin: Spin::default(),
        }
    }

    pub fn earth_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin.earth)
    }

    pub fn atmosphere_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin.atmosphere)
    }

    /// Markers ride on the earth, so their model matrix composes the earth
    /// rotation with the fixed projected offset.
    pub fn marker_model(&self, marker: &Marker) -> Mat4 {
        self.earth_model() * Mat4::from_translation(marker.position)
    }

    pub fn ambient(&self) -> ([f32; 3], f32) {
        self.lights
            .iter()
            .find_map(|light| match light {
                Light::Ambient { color, intensity } => Some((*color, *intensity)),
                Light::Directional { .. } => None,
            })
            .unwrap_or(([1.0, 1.0, 1.0], 0.0))
    }

    pub fn directional(&self) -> ([f32; 3], f32, Vec3) {
        self.lights
            .iter()
            .find_map(|light| match light {
                Light::Directional { color, intensity, direction } => {
                    Some((*color, *intensity, *direction))
                }
                Light::Ambient { .. } => None,
            })
            .unwrap_or(([1.0, 1.0, 1.0], 0.0, Vec3::Z))
    }
}
