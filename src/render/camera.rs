use glam::{Mat4, Vec3};

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// The fixed viewpoint the scene is laid out for.
impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 2.0, 8.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 65.0_f32.to_radians(),
            aspect: 800.0 / 600.0,
            near: 1.0,
            far: 20.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

/// Spherical orbit around `center`, driven by mouse drags and the wheel.
pub struct OrbitController {
    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_phi: f32,
    pub max_phi: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub damping: f32,
    home: (Vec3, f32, f32, f32),
    velocity_theta: f32,
    velocity_phi: f32,
    velocity_radius: f32,
    velocity_pan: Vec3,
}

impl Default for OrbitController {
    fn default() -> Self {
        let phi = std::f32::consts::FRAC_PI_4;
        Self {
            center: Vec3::ZERO,
            radius: 5.0,
            theta: 0.0,
            phi,
            min_radius: 2.0,
            max_radius: 18.0,
            min_phi: 0.05,
            max_phi: std::f32::consts::PI - 0.05,
            rotate_speed: 0.005,
            pan_speed: 0.005,
            zoom_speed: 0.1,
            damping: 0.85,
            home: (Vec3::ZERO, 5.0, 0.0, phi),
            velocity_theta: 0.0,
            velocity_phi: 0.0,
            velocity_radius: 0.0,
            velocity_pan: Vec3::ZERO,
        }
    }
}

impl OrbitController {
    /// Orbit that starts exactly at `eye`, looking at `center`.
    pub fn from_eye(eye: Vec3, center: Vec3) -> Self {
        let offset = eye - center;
        let radius = offset.length().max(f32::EPSILON);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let theta = offset.z.atan2(offset.x);

        Self {
            center,
            radius,
            theta,
            phi,
            home: (center, radius, theta, phi),
            ..Default::default()
        }
    }

    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.velocity_theta += delta_x * self.rotate_speed;
        self.velocity_phi -= delta_y * self.rotate_speed;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.velocity_radius -= delta * self.zoom_speed * self.radius;
    }

    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let right = Vec3::new(-self.theta.sin(), 0.0, self.theta.cos());
        let pan_factor = self.pan_speed * self.radius;
        self.velocity_pan += right * delta_x * pan_factor + Vec3::Y * delta_y * pan_factor;
    }

    pub fn reset(&mut self) {
        (self.center, self.radius, self.theta, self.phi) = self.home;
        self.velocity_theta = 0.0;
        self.velocity_phi = 0.0;
        self.velocity_radius = 0.0;
        self.velocity_pan = Vec3::ZERO;
    }

    pub fn update(&mut self) {
        self.theta += self.velocity_theta;
        self.phi = (self.phi + self.velocity_phi).clamp(self.min_phi, self.max_phi);
        self.radius = (self.radius + self.velocity_radius).clamp(self.min_radius, self.max_radius);
        self.center += self.velocity_pan;

        self.velocity_theta *= self.damping;
        self.velocity_phi *= self.damping;
        self.velocity_radius *= self.damping;
        self.velocity_pan *= self.damping;

        if self.velocity_theta.abs() < 0.0001 {
            self.velocity_theta = 0.0;
        }
        if self.velocity_phi.abs() < 0.0001 {
            self.velocity_phi = 0.0;
        }
        if self.velocity_radius.abs() < 0.0001 {
            self.velocity_radius = 0.0;
        }
        if self.velocity_pan.length_squared() < 0.000001 {
            self.velocity_pan = Vec3::ZERO;
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        let x = self.radius * self.phi.sin() * self.theta.cos();
        let y = self.radius * self.phi.cos();
        let z = self.radius * self.phi.sin() * self.theta.sin();
        self.center + Vec3::new(x, y, z)
    }

    pub fn update_camera(&self, camera: &mut Camera) {
        camera.position = self.camera_position();
        camera.target = self.center;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_eye_reproduces_eye() {
        let camera = Camera::default();
        let orbit = OrbitController::from_eye(camera.position, camera.target);
        assert!((orbit.camera_position() - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_reset_returns_home_after_drag() {
        let eye = Vec3::new(1.0, 2.0, 8.0);
        let mut orbit = OrbitController::from_eye(eye, Vec3::ZERO);
        orbit.rotate(40.0, -25.0);
        orbit.zoom(3.0);
        for _ in 0..10 {
            orbit.update();
        }
        assert!((orbit.camera_position() - eye).length() > 0.1);

        orbit.reset();
        assert!((orbit.camera_position() - eye).length() < 1e-4);
    }

    #[test]
    fn test_velocity_decays_to_rest() {
        let mut orbit = OrbitController::default();
        orbit.rotate(10.0, 0.0);
        for _ in 0..200 {
            orbit.update();
        }
        let theta = orbit.theta;
        orbit.update();
        assert_eq!(orbit.theta, theta);
    }
}
