//! Animation presets, timings and reveal variants.

use std::str::FromStr;
use std::time::Duration;

pub const DURATION_FAST: Duration = Duration::from_millis(300);
pub const DURATION_NORMAL: Duration = Duration::from_millis(600);
pub const DURATION_SLOW: Duration = Duration::from_millis(1000);

pub const STAGGER_CARDS: Duration = Duration::from_millis(100);
pub const STAGGER_ITEMS: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Smooth,
    Bounce,
    Elastic,
    Linear,
}

impl Ease {
    /// Easing name understood by the animation library.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ease::Smooth => "power2.out",
            Ease::Bounce => "back.out(1.7)",
            Ease::Elastic => "elastic.out(1, 0.3)",
            Ease::Linear => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Container fade-in followed by its children.
    PageEntrance,
    Cards,
    FormFields,
    TextReveal,
    ButtonHover,
}

impl Preset {
    pub fn duration(&self) -> Duration {
        match self {
            Preset::ButtonHover => DURATION_FAST,
            _ => DURATION_NORMAL,
        }
    }

    pub fn stagger(&self) -> Option<Duration> {
        match self {
            Preset::PageEntrance => Some(STAGGER_ITEMS),
            Preset::Cards => Some(STAGGER_CARDS),
            Preset::FormFields => Some(STAGGER_CARDS),
            Preset::TextReveal | Preset::ButtonHover => None,
        }
    }

    pub fn ease(&self) -> Ease {
        Ease::Smooth
    }

    /// Presets that register scroll-driven listeners with the driver.
    pub fn uses_scroll_trigger(&self) -> bool {
        matches!(self, Preset::Cards | Preset::FormFields | Preset::TextReveal)
    }
}

/// One keyframe of a reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Frame {
    pub const VISIBLE: Frame = Frame {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    const fn hidden(x: f32, y: f32, scale: f32) -> Frame {
        Frame {
            opacity: 0.0,
            x,
            y,
            scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variant {
    pub hidden: Frame,
    pub visible: Frame,
}

/// Reveal styles for staggered lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealKind {
    Fade,
    #[default]
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    Scale,
}

impl RevealKind {
    pub fn variant(&self) -> Variant {
        let hidden = match self {
            RevealKind::Fade => Frame::hidden(0.0, 0.0, 1.0),
            RevealKind::FadeUp => Frame::hidden(0.0, 20.0, 1.0),
            RevealKind::FadeDown => Frame::hidden(0.0, -20.0, 1.0),
            RevealKind::FadeLeft => Frame::hidden(20.0, 0.0, 1.0),
            RevealKind::FadeRight => Frame::hidden(-20.0, 0.0, 1.0),
            RevealKind::Scale => Frame::hidden(0.0, 0.0, 0.8),
        };
        Variant {
            hidden,
            visible: Frame::VISIBLE,
        }
    }
}

impl FromStr for RevealKind {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `fade-up`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "fade" => RevealKind::Fade,
            "fade-down" => RevealKind::FadeDown,
            "fade-left" => RevealKind::FadeLeft,
            "fade-right" => RevealKind::FadeRight,
            "scale" => RevealKind::Scale,
            _ => RevealKind::FadeUp,
        })
    }
}

/// Start offset of each of `count` items revealed `stagger` apart.
pub fn stagger_delays(count: usize, stagger: Duration) -> Vec<Duration> {
    (0..count as u32).map(|i| stagger * i).collect()
}
