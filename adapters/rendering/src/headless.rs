//! Window-less backend that replays scripted input.

use std::collections::VecDeque;

use anyhow::Result;

use crate::{FrameControl, FrameInput, Presentation, RenderingBackend, Scene};

/// Backend that feeds a fixed script of frame inputs to the update closure.
///
/// The loop stops when the script runs out or the closure returns
/// [`FrameControl::Exit`]. Presented scenes are discarded.
#[derive(Clone, Debug, Default)]
pub struct HeadlessBackend {
    script: VecDeque<FrameInput>,
}

impl HeadlessBackend {
    /// Creates a backend that replays `script` in order.
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Creates a backend that runs `frames` frames without any input.
    #[must_use]
    pub fn idle(frames: usize) -> Self {
        Self::new(std::iter::repeat_with(FrameInput::default).take(frames))
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        let Self { mut script } = self;

        tracing::debug!(title = %window_title, frames = script.len(), "starting headless run");
        let mut presented = 0_usize;
        while let Some(input) = script.pop_front() {
            let control = update_scene(input, &mut scene);
            presented += 1;
            if control == FrameControl::Exit {
                break;
            }
        }
        tracing::debug!(presented, "headless run finished");

        Ok(())
    }
}
