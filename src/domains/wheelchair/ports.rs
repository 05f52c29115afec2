use super::projections::SceneProjection;
use crate::common::DomainResult;

/// Port for whatever draws the scene (canvas, terminal, JSON stream, ...).
/// Must tolerate an empty path.
pub trait SceneRenderer: Send {
    fn render(&mut self, scene: &SceneProjection) -> DomainResult<()>;
}
