use nalgebra::Vector3;

/// An X3D-style material: flat colours and lighting coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    id: String,
    pub diffuse: Vector3<f32>,
    pub emissive: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub ambient_intensity: f32,
    pub shininess: f32,
    pub transparency: f32,
    pub is_smooth: bool,
}

impl Material {
    /// A material with the X3D default values.
    pub fn new(id: impl Into<String>) -> Self {
        Material {
            id: id.into(),
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            emissive: Vector3::zeros(),
            specular: Vector3::new(1.0, 1.0, 1.0),
            ambient_intensity: 0.2,
            shininess: 0.2,
            transparency: 0.0,
            is_smooth: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn with_diffuse(mut self, diffuse: Vector3<f32>) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
}
