use crate::trajectory::TrajectoryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExoError>;

#[derive(Debug, Error)]
pub enum ExoError {
    #[error("trajectory error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
