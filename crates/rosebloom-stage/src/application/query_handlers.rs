//! Query handlers for the Stage Orchestration context.
//!
//! This module builds the read-only view a renderer needs from the
//! controller state.

use serde::Serialize;

use crate::application::controller::StageController;
use crate::domain::content::FOOTER;
use crate::domain::runtime::StageDetail;
use crate::domain::stage::Stage;

/// Read-only view of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    /// The live stage, `None` before start and after shutdown.
    pub stage: Option<Stage>,
    /// One-based position of the live stage, zero when idle.
    pub position: usize,
    /// Number of stages in the experience.
    pub stage_count: usize,
    /// Virtual milliseconds since start.
    pub elapsed_ms: u64,
    /// Footer caption, once revealed.
    pub footer: Option<&'static str>,
    /// Stage-specific state.
    pub detail: StageDetail,
}

/// Builds the view for `controller`.
#[must_use]
pub fn stage_view(controller: &StageController) -> StageView {
    let stage = controller.current_stage();
    StageView {
        stage,
        position: stage.map_or(0, |stage| stage.position() + 1),
        stage_count: Stage::ORDER.len(),
        elapsed_ms: controller.now_ms(),
        footer: controller.footer_visible().then_some(FOOTER),
        detail: controller.detail(),
    }
}
