//! Plain-text rendering of the stage view.

use std::fmt::Write;

use rosebloom_stage::application::query_handlers::StageView;
use rosebloom_stage::domain::content::{Element, ROSE_HINT, WATERING_COMPLETE};
use rosebloom_stage::domain::runtime::StageDetail;

const BAR_WIDTH: usize = 10;

/// Renders `view` as a multi-line frame.
///
/// Elapsed time is left out so that two frames compare equal whenever
/// nothing visible changed.
#[must_use]
pub fn render(view: &StageView) -> String {
    let mut frame = String::new();
    match view.stage {
        Some(stage) => {
            let _ = writeln!(frame, "[{}/{}] {stage}", view.position, view.stage_count);
        }
        None => frame.push_str("[idle]\n"),
    }
    render_detail(&mut frame, &view.detail);
    if let Some(footer) = view.footer {
        let _ = writeln!(frame, "-- {footer}");
    }
    frame
}

fn render_detail(frame: &mut String, detail: &StageDetail) {
    match detail {
        StageDetail::Idle => {}
        StageDetail::Intro { visible } | StageDetail::Memory { visible } => {
            render_elements(frame, visible);
        }
        StageDetail::Watering { view, message } => {
            let filled = usize::try_from(view.progress).unwrap_or(100) * BAR_WIDTH / 100;
            let _ = writeln!(frame, "  {message}");
            let _ = writeln!(
                frame,
                "  [{}{}] {}% ({} taps left)",
                "#".repeat(filled),
                "-".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
                view.progress,
                view.taps_left
            );
            let leaves = view.decorations.leaves.iter().filter(|leaf| **leaf).count();
            let _ = writeln!(frame, "  stem {:.0} · leaves {leaves}", view.stem_height);
            if view.decorations.bloom {
                let _ = writeln!(frame, "  {WATERING_COMPLETE}");
            }
        }
        StageDetail::Envelope { phase, visible } => {
            let _ = writeln!(frame, "  envelope: {phase:?}");
            render_elements(frame, visible);
        }
        StageDetail::Rose { shaking, visible } => {
            let _ = writeln!(frame, "  🌹{}", if *shaking { " (shaking)" } else { "" });
            render_elements(frame, visible);
            if visible.contains(&Element::RoseTitle) {
                let _ = writeln!(frame, "  {ROSE_HINT}");
            }
        }
        StageDetail::Message {
            displayed,
            typing_complete,
            visible,
        } => {
            for line in displayed.lines() {
                let _ = writeln!(frame, "  {line}");
            }
            if !typing_complete {
                frame.push_str("  ▌\n");
            }
            render_elements(frame, visible);
        }
        StageDetail::Flipbook {
            page,
            page_count,
            caption,
            turning,
        } => {
            let _ = writeln!(
                frame,
                "  page {}/{page_count}: {caption}{}",
                page + 1,
                if *turning { " …" } else { "" }
            );
        }
        StageDetail::Hearts { overlay_active } => {
            if *overlay_active {
                frame.push_str("  ♥ ♥ ♥ ♥ ♥\n");
            }
        }
    }
}

fn render_elements(frame: &mut String, visible: &[Element]) {
    for text in visible.iter().filter_map(|element| element.text()) {
        for line in text.lines() {
            let _ = writeln!(frame, "  {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use rosebloom_stage::domain::content::{FLIPBOOK_PAGES, FOOTER, INTRO_TITLE};
    use rosebloom_stage::domain::stage::Stage;

    use super::*;

    fn view(stage: Stage, detail: StageDetail) -> StageView {
        StageView {
            stage: Some(stage),
            position: stage.position() + 1,
            stage_count: 8,
            elapsed_ms: 1_234,
            footer: None,
            detail,
        }
    }

    #[test]
    fn test_renders_header_and_visible_texts() {
        // Arrange
        let view = view(
            Stage::Intro,
            StageDetail::Intro {
                visible: vec![Element::IntroCard, Element::IntroTitle],
            },
        );

        // Act
        let frame = render(&view);

        // Assert
        assert_eq!(frame, format!("[1/8] intro\n  {INTRO_TITLE}\n"));
    }

    #[test]
    fn test_frame_ignores_elapsed_time() {
        // Arrange
        let earlier = view(Stage::Hearts, StageDetail::Hearts { overlay_active: true });
        let mut later = earlier.clone();
        later.elapsed_ms += 500;

        // Act & Assert
        assert_eq!(render(&earlier), render(&later));
    }

    #[test]
    fn test_renders_flipbook_page_and_footer() {
        // Arrange
        let mut view = view(
            Stage::Flipbook,
            StageDetail::Flipbook {
                page: 1,
                page_count: 4,
                caption: FLIPBOOK_PAGES[1],
                turning: true,
            },
        );
        view.footer = Some(FOOTER);

        // Act
        let frame = render(&view);

        // Assert
        assert!(frame.contains(&format!("page 2/4: {} …", FLIPBOOK_PAGES[1])));
        assert!(frame.ends_with(&format!("-- {FOOTER}\n")));
    }

    #[test]
    fn test_idle_view() {
        // Arrange
        let view = StageView {
            stage: None,
            position: 0,
            stage_count: 8,
            elapsed_ms: 0,
            footer: None,
            detail: StageDetail::Idle,
        };

        // Act & Assert
        assert_eq!(render(&view), "[idle]\n");
    }
}
