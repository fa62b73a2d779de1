//! Authored text and the named elements that carry it.

use serde::{Deserialize, Serialize};

use super::stage::Stage;

pub const INTRO_TITLE: &str = "Hey Miss";
pub const INTRO_SUBTITLE: &str = "I found something special\nin the garden…";
pub const INTRO_BUTTON: &str = "Wanna see? 🌸";

/// One message per 20% of watering progress.
pub const WATERING_MESSAGES: [&str; 6] = [
    "Look! what i've brought for you. a seed, Let's plant it 🌱",
    "See! it's growing!",
    "Keep watering, there's a surprise! ",
    "A little more efforts… <3",
    "Almost there… !!",
    "Aww, you did it! it's blooming! A rose just like you 🌹",
];
pub const WATERING_COMPLETE: &str = "🌹 Complete!";

pub const ENVELOPE_HEADING: &str = "Okay so, i've smth to tell You 🥰";
pub const ENVELOPE_TAP_HINT: &str = "Tap to open";
pub const LETTER_SALUTATION: &str = "Dear aarohi";
pub const LETTER_BODY: &str = "Happy rose day! Just like the roses, you bring lots of color and fragrance to my life. \
Every single petal falling in background represents a smile you've gave me. You make me the happiest 🌹";
pub const ENVELOPE_BUTTON: &str = "So i want to wish you →";
pub const CINEMATIC_TITLE: &str = "A Veryyyy Happy Rose Dayyy!!";
pub const CINEMATIC_DEDICATION: &str = "To the prettiesttt Rose i knowwww 😊🌹";

pub const ROSE_TITLE: &str = "Happy Rose Day";
pub const ROSE_HINT: &str = "Tap On The rose (yourself) to continue ✨";

pub const MAIN_MESSAGE: &str = "It is not really about rose day,

This is just a small surprise to remind you that;
How much you mean to me,
How much you matter to me,
And how precious you are in my eyes <3.";
pub const THANK_YOU: &str = "Thank you so much for being in my life ♥️";
pub const SECONDARY_MESSAGE: &str = "You're really special in ways words can never explain.";
pub const CLOSING_LINE: &str = "Keep this one close 🌹";
pub const KEEP_ROSE_BUTTON: &str = "Keep the rose 🌹";

/// Captions of the flipbook pages, in reading order.
pub const FLIPBOOK_PAGES: [&str; 4] = [
    "The day the first seed was planted 🌱",
    "Every season it kept growing",
    "Through every storm, it stayed",
    "And now it blooms, just for you 🌹",
];

pub const MEMORY_FIRST_LINE: &str = "8 billion peoples in the world,";
pub const MEMORY_SECOND_LINE: &str = "And i got...";
pub const MEMORY_CAPTION: &str = "\"The most precious, anyone can have 💕.\"";

pub const FOOTER: &str = "Since 24th june 2008, this rose is just keep blooming.";

/// A named piece of content whose visibility the core controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    IntroCard,
    IntroRose,
    IntroTitle,
    IntroDivider,
    IntroSubtitle,
    IntroButton,
    EnvelopeHeading,
    EnvelopeTapHint,
    LetterSalutation,
    LetterBody,
    EnvelopeButton,
    CinematicOverlay,
    CinematicTitle,
    CinematicDedication,
    RoseTitle,
    ThankYou,
    SecondaryMessage,
    ClosingLine,
    KeepRoseButton,
    HeartOverlay,
    MemoryFirstLine,
    MemorySecondLine,
    MemoryCard,
    Footer,
}

impl Element {
    /// The stage that owns this element, or `None` for controller-owned ones.
    #[must_use]
    pub const fn stage(self) -> Option<Stage> {
        match self {
            Element::IntroCard
            | Element::IntroRose
            | Element::IntroTitle
            | Element::IntroDivider
            | Element::IntroSubtitle
            | Element::IntroButton => Some(Stage::Intro),
            Element::EnvelopeHeading
            | Element::EnvelopeTapHint
            | Element::LetterSalutation
            | Element::LetterBody
            | Element::EnvelopeButton
            | Element::CinematicOverlay
            | Element::CinematicTitle
            | Element::CinematicDedication => Some(Stage::Envelope),
            Element::RoseTitle => Some(Stage::Rose),
            Element::ThankYou
            | Element::SecondaryMessage
            | Element::ClosingLine
            | Element::KeepRoseButton => Some(Stage::Message),
            Element::HeartOverlay => Some(Stage::Hearts),
            Element::MemoryFirstLine | Element::MemorySecondLine | Element::MemoryCard => {
                Some(Stage::Memory)
            }
            Element::Footer => None,
        }
    }

    /// Text carried by the element, if it has any.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        match self {
            Element::IntroRose => Some("🌹"),
            Element::IntroTitle => Some(INTRO_TITLE),
            Element::IntroSubtitle => Some(INTRO_SUBTITLE),
            Element::IntroButton => Some(INTRO_BUTTON),
            Element::EnvelopeHeading => Some(ENVELOPE_HEADING),
            Element::EnvelopeTapHint => Some(ENVELOPE_TAP_HINT),
            Element::LetterSalutation => Some(LETTER_SALUTATION),
            Element::LetterBody => Some(LETTER_BODY),
            Element::EnvelopeButton => Some(ENVELOPE_BUTTON),
            Element::CinematicTitle => Some(CINEMATIC_TITLE),
            Element::CinematicDedication => Some(CINEMATIC_DEDICATION),
            Element::RoseTitle => Some(ROSE_TITLE),
            Element::ThankYou => Some(THANK_YOU),
            Element::SecondaryMessage => Some(SECONDARY_MESSAGE),
            Element::ClosingLine => Some(CLOSING_LINE),
            Element::KeepRoseButton => Some(KEEP_ROSE_BUTTON),
            Element::MemoryFirstLine => Some(MEMORY_FIRST_LINE),
            Element::MemorySecondLine => Some(MEMORY_SECOND_LINE),
            Element::MemoryCard => Some(MEMORY_CAPTION),
            Element::Footer => Some(FOOTER),
            Element::IntroCard
            | Element::IntroDivider
            | Element::CinematicOverlay
            | Element::HeartOverlay => None,
        }
    }
}
