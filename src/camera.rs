use glam::Mat4;
use keyfield_core::CameraPose;

/// Camera block shared by the word, hint-line and particle shaders. Right
/// and up let billboards face the camera without a per-instance rotation.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
}

impl CameraUniforms {
    pub fn from_pose(pose: &CameraPose, aspect: f32) -> Self {
        let view_proj: Mat4 = pose.projection_matrix(aspect) * pose.view_matrix();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            right: pose.right().extend(0.0).to_array(),
            up: pose.up().extend(0.0).to_array(),
        }
    }
}
