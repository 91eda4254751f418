//! Sample plane positioning.
//!
//! A sample plane is a `width` x `height` rectangle whose centre sits at
//! distance `r` from a target point, in the direction given by the polar
//! angle `theta` and azimuth `phi`. The rectangle faces the target and can
//! be spun about its normal by `gamma`. All angles are in degrees.
//!
//! Derived quantities (normal, tangents and corners) are kept consistent
//! with the parameters: every setter recomputes them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::InfinitePlane;
use crate::matrix::Matrix3x3;
use crate::settings::{
    PlaneSettings, DEFAULT_DISTANCE_FACTOR, DEFAULT_POINT_RESOLUTION, DEFAULT_SCALE_MULTIPLIER,
};
use crate::vector::Vector3;


/// An oriented rectangle positioned around a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePlane {
    length_scale: f64,
    scale_multiplier: f64,
    point_resolution_theta: u32,
    point_resolution_phi: u32,
    target: Vector3,

    theta: f64,
    phi: f64,
    gamma: f64,
    r: f64,
    width: f64,
    height: f64,

    n: Vector3,
    pc: Vector3,
    t_theta: Vector3,
    t_phi: Vector3,
    rotation: Matrix3x3,
    p1: Vector3,
    p2: Vector3,
    p3: Vector3,
    p4: Vector3,
}

/// Serialisable snapshot of a sample plane's parameters and derived points.
///
/// Points are relative to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneGeometry {
    pub target: Vector3,
    pub theta: f64,
    pub phi: f64,
    pub gamma: f64,
    pub r: f64,
    pub width: f64,
    pub height: f64,
    pub n: Vector3,
    pub pc: Vector3,
    pub t_theta: Vector3,
    pub t_phi: Vector3,
    pub corners: [Vector3; 4],
    pub marker_radius: f64,
}

impl SamplePlane {
    /// Plane sized for a model with the given length scale.
    ///
    /// Starts on the positive z axis at `r = 2 * length_scale`, with
    /// width and height equal to `length_scale`.
    pub fn new(length_scale: f64) -> Self {
        let mut plane = Self {
            length_scale,
            scale_multiplier: DEFAULT_SCALE_MULTIPLIER,
            point_resolution_theta: DEFAULT_POINT_RESOLUTION,
            point_resolution_phi: DEFAULT_POINT_RESOLUTION,
            target: Vector3::zeros(),
            theta: 0.0,
            phi: 0.0,
            gamma: 0.0,
            r: DEFAULT_DISTANCE_FACTOR * length_scale,
            width: length_scale,
            height: length_scale,
            n: Vector3::zeros(),
            pc: Vector3::zeros(),
            t_theta: Vector3::zeros(),
            t_phi: Vector3::zeros(),
            rotation: Matrix3x3::identity(),
            p1: Vector3::zeros(),
            p2: Vector3::zeros(),
            p3: Vector3::zeros(),
            p4: Vector3::zeros(),
        };
        plane.update();
        plane
    }

    /// Plane whose initial parameters come from configuration.
    pub fn from_settings(length_scale: f64, settings: &PlaneSettings) -> Self {
        let mut plane = Self::new(length_scale);
        plane.scale_multiplier = settings.scale_multiplier;
        plane.point_resolution_theta = settings.point_resolution_theta;
        plane.point_resolution_phi = settings.point_resolution_phi;
        plane.r = settings.distance_factor * length_scale;
        plane.width = settings.width_factor * length_scale;
        plane.height = settings.height_factor * length_scale;
        plane.theta = settings.theta;
        plane.phi = settings.phi;
        plane.gamma = settings.gamma;
        plane.update();
        plane
    }

    /// Recomputes normal, centre, tangents and corners from the parameters.
    fn update(&mut self) {
        let (sin_theta, cos_theta) = self.theta.to_radians().sin_cos();
        let (sin_phi, cos_phi) = self.phi.to_radians().sin_cos();

        self.n = Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);
        self.pc = self.r * self.n;

        // spherical tangents before the in-plane spin
        let t_theta = Vector3::new(cos_theta * cos_phi, cos_theta * sin_phi, -sin_theta);
        let t_phi = Vector3::new(-sin_phi, cos_phi, 0.0);

        self.rotation = Matrix3x3::rotation_unit(self.gamma.to_radians(), &self.n);
        self.t_theta = self.rotation * t_theta;
        self.t_phi = self.rotation * t_phi;

        let half_h = 0.5 * self.height * self.t_theta;
        let half_w = 0.5 * self.width * self.t_phi;
        self.p1 = self.pc - half_h - half_w;
        self.p2 = self.pc - half_h + half_w;
        self.p3 = self.pc + half_h - half_w;
        self.p4 = self.pc + half_h + half_w;

        log::trace!(
            "sample plane update: theta {}, phi {}, gamma {}, r {}, n {}, pc {}",
            self.theta,
            self.phi,
            self.gamma,
            self.r,
            self.n,
            self.pc
        );
    }

    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    pub fn scale_multiplier(&self) -> f64 {
        self.scale_multiplier
    }

    pub fn point_resolution_theta(&self) -> u32 {
        self.point_resolution_theta
    }

    pub fn point_resolution_phi(&self) -> u32 {
        self.point_resolution_phi
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Unit normal, pointing away from the target.
    pub fn n(&self) -> Vector3 {
        self.n
    }

    /// Plane centre, relative to the target.
    pub fn pc(&self) -> Vector3 {
        self.pc
    }

    pub fn t_theta(&self) -> Vector3 {
        self.t_theta
    }

    pub fn t_phi(&self) -> Vector3 {
        self.t_phi
    }

    /// Rotation by `gamma` about the normal.
    pub fn rotation_matrix(&self) -> Matrix3x3 {
        self.rotation
    }

    pub fn p1(&self) -> Vector3 {
        self.p1
    }

    pub fn p2(&self) -> Vector3 {
        self.p2
    }

    pub fn p3(&self) -> Vector3 {
        self.p3
    }

    pub fn p4(&self) -> Vector3 {
        self.p4
    }

    /// Corners `p1..p4`, relative to the target.
    pub fn corners(&self) -> [Vector3; 4] {
        [self.p1, self.p2, self.p3, self.p4]
    }

    /// Corners in world coordinates.
    pub fn world_corners(&self) -> [Vector3; 4] {
        self.corners().map(|p| p + self.target)
    }

    pub fn world_pc(&self) -> Vector3 {
        self.pc + self.target
    }

    /// Radius of the sphere markers drawn at the corners.
    pub fn marker_radius(&self) -> f64 {
        self.scale_multiplier * self.length_scale
    }

    /// The infinite plane containing the rectangle, relative to the target.
    pub fn plane(&self) -> InfinitePlane {
        InfinitePlane::new(self.pc, self.n)
    }

    pub fn geometry(&self) -> PlaneGeometry {
        PlaneGeometry {
            target: self.target,
            theta: self.theta,
            phi: self.phi,
            gamma: self.gamma,
            r: self.r,
            width: self.width,
            height: self.height,
            n: self.n,
            pc: self.pc,
            t_theta: self.t_theta,
            t_phi: self.t_phi,
            corners: self.corners(),
            marker_radius: self.marker_radius(),
        }
    }

    pub fn set_theta(&mut self, theta: f64) {
        self.theta = theta;
        self.update();
    }

    pub fn set_phi(&mut self, phi: f64) {
        self.phi = phi;
        self.update();
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
        self.update();
    }

    pub fn set_r(&mut self, r: f64) {
        self.r = r;
        self.update();
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.update();
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.update();
    }

    pub fn set_scale_multiplier(&mut self, scale_multiplier: f64) {
        self.scale_multiplier = scale_multiplier;
        self.update();
    }

    pub fn set_point_resolution_theta(&mut self, resolution: u32) {
        self.point_resolution_theta = resolution;
        self.update();
    }

    pub fn set_point_resolution_phi(&mut self, resolution: u32) {
        self.point_resolution_phi = resolution;
        self.update();
    }

    /// Moves the target. Points relative to the target are unchanged.
    pub fn set_target(&mut self, target: Vector3) {
        log::debug!("sample plane target moved to {}", target);
        self.target = target;
    }
}

impl fmt::Display for SamplePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample plane:
  - Target: {}
  - Angles (theta, phi, gamma): {:.3}, {:.3}, {:.3}
  - Distance: {:.6}
  - Size: {:.6} x {:.6}
  - Normal: {}
  - Centre: {}
  - Tangents: {}, {}
  - Corners: {}, {}, {}, {}
  - Marker radius: {:.6}",
            self.target,
            self.theta,
            self.phi,
            self.gamma,
            self.r,
            self.width,
            self.height,
            self.n,
            self.pc,
            self.t_theta,
            self.t_phi,
            self.p1,
            self.p2,
            self.p3,
            self.p4,
            self.marker_radius(),
        )
    }
}
