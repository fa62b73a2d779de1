//! Authored runs, validated once at startup.

use rosebloom_core::error::DomainError;
use rosebloom_core::sequence::{Sequence, SequenceStep};
use rosebloom_core::typewriter::Typewriter;

use super::content::{Element, FLIPBOOK_PAGES, MAIN_MESSAGE, WATERING_MESSAGES};
use super::effects::StageEffect;
use super::stage::Stage;
use super::timing::{
    CINEMATIC_COMPLETE_MS, CINEMATIC_DEDICATION_HIDE_MS, CINEMATIC_DEDICATION_SHOW_MS,
    CINEMATIC_OVERLAY_FADE_MS, CINEMATIC_TITLE_HIDE_MS, CINEMATIC_TITLE_SHOW_MS, CLOSING_LINE_MS,
    ENVELOPE_BUTTON_MS, ENVELOPE_HEADING_MS, ENVELOPE_TAP_HINT_MS, FLIPBOOK_TURN_MS, FOOTER_MS,
    HEARTS_DURATION_MS, INTRO_BUTTON_MS, INTRO_CARD_MS, INTRO_DIVIDER_MS, INTRO_ROSE_MS,
    INTRO_SUBTITLE_MS, INTRO_TITLE_MS, KEEP_ROSE_BUTTON_MS, LETTER_BODY_MS, LETTER_SALUTATION_MS,
    MEMORY_CARD_MS, MEMORY_FIRST_LINE_MS, MEMORY_SECOND_LINE_MS, ROSE_SHAKE_MS, ROSE_TITLE_MS,
    SECONDARY_LINE_MS, THANK_YOU_MS, TYPEWRITER_TICK_MS, WATERING_SETTLE_MS,
};

/// Every timed run of the experience, built from the authored constants.
#[derive(Debug, Clone)]
pub struct Storyboard {
    /// Intro card reveal, started on entry.
    pub intro: Sequence<StageEffect>,
    /// One message per 20% of watering progress.
    pub watering_messages: &'static [&'static str],
    /// Delay between the bloom and the end of the watering stage.
    pub watering_settle_ms: u64,
    /// Envelope heading and tap hint, started on entry.
    pub envelope_heading: Sequence<StageEffect>,
    /// Letter reveal, started when the envelope opens.
    pub envelope_letter: Sequence<StageEffect>,
    /// Cinematic wish; its last step completes the envelope stage.
    pub cinematic: Sequence<StageEffect>,
    pub rose_title: Sequence<StageEffect>,
    /// Shake triggered by a hint; a new hint restarts it.
    pub rose_shake: Sequence<StageEffect>,
    /// Idle typewriter over the main message, cloned per stage entry.
    pub message_typewriter: Typewriter<StageEffect>,
    /// Lines revealed once typing completes.
    pub message_follow_up: Sequence<StageEffect>,
    /// Closing line and keep-rose button, timed from stage entry.
    pub message_closing: Sequence<StageEffect>,
    pub flipbook_pages: &'static [&'static str],
    pub flipbook_turn: Sequence<StageEffect>,
    pub hearts: Sequence<StageEffect>,
    pub memory: Sequence<StageEffect>,
    /// Footer caption, owned by the controller rather than a stage.
    pub footer: Sequence<StageEffect>,
}

fn check_owner(run: &Sequence<StageEffect>, owner: Option<Stage>) -> Result<(), DomainError> {
    for step in run.steps() {
        if let StageEffect::Show(element) | StageEffect::Hide(element) = step.effect {
            if element.stage() != owner {
                return Err(DomainError::Validation(format!(
                    "{element:?} at {}ms is not owned by {owner:?}",
                    step.offset_ms
                )));
            }
        }
    }
    Ok(())
}

fn reveal(offset_ms: u64, element: Element) -> SequenceStep<StageEffect> {
    SequenceStep::new(offset_ms, StageEffect::Show(element))
}

fn conceal(offset_ms: u64, element: Element) -> SequenceStep<StageEffect> {
    SequenceStep::new(offset_ms, StageEffect::Hide(element))
}

impl Storyboard {
    /// Builds the authored storyboard.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if an authored run declares offsets out of
    /// order or the typewriter interval is zero.
    pub fn authored() -> Result<Self, DomainError> {
        let storyboard = Self {
            intro: Sequence::new(vec![
                reveal(INTRO_CARD_MS, Element::IntroCard),
                reveal(INTRO_ROSE_MS, Element::IntroRose),
                reveal(INTRO_TITLE_MS, Element::IntroTitle),
                reveal(INTRO_DIVIDER_MS, Element::IntroDivider),
                reveal(INTRO_SUBTITLE_MS, Element::IntroSubtitle),
                reveal(INTRO_BUTTON_MS, Element::IntroButton),
            ])?,
            watering_messages: &WATERING_MESSAGES,
            watering_settle_ms: WATERING_SETTLE_MS,
            envelope_heading: Sequence::new(vec![
                reveal(ENVELOPE_HEADING_MS, Element::EnvelopeHeading),
                reveal(ENVELOPE_TAP_HINT_MS, Element::EnvelopeTapHint),
            ])?,
            envelope_letter: Sequence::new(vec![
                reveal(LETTER_SALUTATION_MS, Element::LetterSalutation),
                reveal(LETTER_BODY_MS, Element::LetterBody),
                reveal(ENVELOPE_BUTTON_MS, Element::EnvelopeButton),
            ])?,
            cinematic: Sequence::new(vec![
                reveal(CINEMATIC_TITLE_SHOW_MS, Element::CinematicTitle),
                conceal(CINEMATIC_TITLE_HIDE_MS, Element::CinematicTitle),
                reveal(CINEMATIC_DEDICATION_SHOW_MS, Element::CinematicDedication),
                conceal(CINEMATIC_DEDICATION_HIDE_MS, Element::CinematicDedication),
                conceal(CINEMATIC_OVERLAY_FADE_MS, Element::CinematicOverlay),
                SequenceStep::new(CINEMATIC_COMPLETE_MS, StageEffect::Complete),
            ])?,
            rose_title: Sequence::once(ROSE_TITLE_MS, StageEffect::Show(Element::RoseTitle)),
            rose_shake: Sequence::once(ROSE_SHAKE_MS, StageEffect::StopShake),
            message_typewriter: Typewriter::new(
                MAIN_MESSAGE,
                TYPEWRITER_TICK_MS,
                StageEffect::TypeTick,
            )?,
            message_follow_up: Sequence::new(vec![
                reveal(THANK_YOU_MS, Element::ThankYou),
                reveal(SECONDARY_LINE_MS, Element::SecondaryMessage),
            ])?,
            message_closing: Sequence::new(vec![
                reveal(CLOSING_LINE_MS, Element::ClosingLine),
                reveal(KEEP_ROSE_BUTTON_MS, Element::KeepRoseButton),
            ])?,
            flipbook_pages: &FLIPBOOK_PAGES,
            flipbook_turn: Sequence::once(FLIPBOOK_TURN_MS, StageEffect::TurnSettled),
            hearts: Sequence::once(HEARTS_DURATION_MS, StageEffect::Complete),
            memory: Sequence::new(vec![
                reveal(MEMORY_FIRST_LINE_MS, Element::MemoryFirstLine),
                reveal(MEMORY_SECOND_LINE_MS, Element::MemorySecondLine),
                reveal(MEMORY_CARD_MS, Element::MemoryCard),
            ])?,
            footer: Sequence::once(FOOTER_MS, StageEffect::Show(Element::Footer)),
        };
        storyboard.validate()?;
        Ok(storyboard)
    }

    /// Checks the authored lists the stages index into, and that every run
    /// only shows or hides elements owned by the stage that plays it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there are no watering messages,
    /// no flipbook pages, or a run targets another stage's element.
    pub fn validate(&self) -> Result<(), DomainError> {
        let owned_runs = [
            (&self.intro, Some(Stage::Intro)),
            (&self.envelope_heading, Some(Stage::Envelope)),
            (&self.envelope_letter, Some(Stage::Envelope)),
            (&self.cinematic, Some(Stage::Envelope)),
            (&self.rose_title, Some(Stage::Rose)),
            (&self.message_follow_up, Some(Stage::Message)),
            (&self.message_closing, Some(Stage::Message)),
            (&self.memory, Some(Stage::Memory)),
            (&self.footer, None),
        ];
        for (run, owner) in owned_runs {
            check_owner(run, owner)?;
        }

        if self.watering_messages.is_empty() {
            return Err(DomainError::Validation(
                "watering needs at least one message".to_owned(),
            ));
        }
        if self.flipbook_pages.is_empty() {
            return Err(DomainError::Validation(
                "flipbook needs at least one page".to_owned(),
            ));
        }
        Ok(())
    }
}
