//! Reader-adjustable display preferences and the presets that bundle them.

use crate::scroll::viewport::REDUCED_MOTION_CLASS;

pub const FONT_SIZE_RANGE: (u32, u32) = (50, 200);
pub const LINE_HEIGHT_RANGE: (u32, u32) = (80, 200);
pub const LETTER_SPACING_RANGE: (f64, f64) = (0.0, 2.0);
const PERCENT_STEP: u32 = 10;
const SPACING_STEP: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    HighContrast,
    Grayscale,
    ReducedMotion,
    FocusIndicators,
    ScreenReader,
    KeyboardNavigation,
    ColorBlind,
    Dyslexia,
    DarkMode,
    FocusMode,
    UnderlineLinks,
    ReadableFont,
}

impl Flag {
    pub const ALL: [Flag; 12] = [
        Flag::HighContrast,
        Flag::Grayscale,
        Flag::ReducedMotion,
        Flag::FocusIndicators,
        Flag::ScreenReader,
        Flag::KeyboardNavigation,
        Flag::ColorBlind,
        Flag::Dyslexia,
        Flag::DarkMode,
        Flag::FocusMode,
        Flag::UnderlineLinks,
        Flag::ReadableFont,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Flag::HighContrast => "High contrast",
            Flag::Grayscale => "Grayscale",
            Flag::ReducedMotion => "Reduce motion",
            Flag::FocusIndicators => "Focus indicators",
            Flag::ScreenReader => "Screen reader mode",
            Flag::KeyboardNavigation => "Keyboard navigation",
            Flag::ColorBlind => "Color blind friendly",
            Flag::Dyslexia => "Dyslexia friendly",
            Flag::DarkMode => "Dark mode",
            Flag::FocusMode => "Focus mode",
            Flag::UnderlineLinks => "Underline links",
            Flag::ReadableFont => "Readable font",
        }
    }

    /// Body class toggled by this flag. Grayscale is a style filter instead.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Flag::HighContrast => Some("custom-high-contrast"),
            Flag::Grayscale => None,
            Flag::ReducedMotion => Some(REDUCED_MOTION_CLASS),
            Flag::FocusIndicators => Some("enhanced-focus"),
            Flag::ScreenReader => Some("screen-reader-optimized"),
            Flag::KeyboardNavigation => Some("keyboard-navigation"),
            Flag::ColorBlind => Some("color-blind-friendly"),
            Flag::Dyslexia => Some("dyslexia-friendly"),
            Flag::DarkMode => Some("dark-mode"),
            Flag::FocusMode => Some("focus-mode"),
            Flag::UnderlineLinks => Some("underline-links"),
            Flag::ReadableFont => Some("readable-font"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Dyslexia,
    LowVision,
    MotorControl,
    Reading,
}

impl Profile {
    pub const ALL: [Profile; 4] = [
        Profile::Dyslexia,
        Profile::LowVision,
        Profile::MotorControl,
        Profile::Reading,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Profile::Dyslexia => "Dyslexia",
            Profile::LowVision => "Low vision",
            Profile::MotorControl => "Motor control",
            Profile::Reading => "Reading",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Adjustment {
    FontSize,
    LineHeight,
    LetterSpacing,
}

/// One user action in the settings panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingsChange {
    Toggle(Flag),
    Set(Flag, bool),
    Increase(Adjustment),
    Decrease(Adjustment),
    Profile(Profile),
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccessibilitySettings {
    pub font_size: u32,
    pub line_height: u32,
    pub letter_spacing: f64,
    pub high_contrast: bool,
    pub grayscale: bool,
    pub reduced_motion: bool,
    pub focus_indicators: bool,
    pub screen_reader: bool,
    pub keyboard_navigation: bool,
    pub color_blind: bool,
    pub dyslexia: bool,
    pub dark_mode: bool,
    pub focus_mode: bool,
    pub underline_links: bool,
    pub readable_font: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_size: 100,
            line_height: 100,
            letter_spacing: 0.0,
            high_contrast: false,
            grayscale: false,
            reduced_motion: false,
            focus_indicators: true,
            screen_reader: false,
            keyboard_navigation: true,
            color_blind: false,
            dyslexia: false,
            dark_mode: false,
            focus_mode: false,
            underline_links: false,
            readable_font: false,
        }
    }
}

impl AccessibilitySettings {
    pub fn apply(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::Toggle(flag) => self.toggle(flag),
            SettingsChange::Set(flag, on) => self.set_flag(flag, on),
            SettingsChange::Increase(adjustment) => self.increase(adjustment),
            SettingsChange::Decrease(adjustment) => self.decrease(adjustment),
            SettingsChange::Profile(profile) => self.apply_profile(profile),
            SettingsChange::Reset => *self = Self::default(),
        }
    }

    fn flag_mut(&mut self, flag: Flag) -> &mut bool {
        match flag {
            Flag::HighContrast => &mut self.high_contrast,
            Flag::Grayscale => &mut self.grayscale,
            Flag::ReducedMotion => &mut self.reduced_motion,
            Flag::FocusIndicators => &mut self.focus_indicators,
            Flag::ScreenReader => &mut self.screen_reader,
            Flag::KeyboardNavigation => &mut self.keyboard_navigation,
            Flag::ColorBlind => &mut self.color_blind,
            Flag::Dyslexia => &mut self.dyslexia,
            Flag::DarkMode => &mut self.dark_mode,
            Flag::FocusMode => &mut self.focus_mode,
            Flag::UnderlineLinks => &mut self.underline_links,
            Flag::ReadableFont => &mut self.readable_font,
        }
    }

    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::HighContrast => self.high_contrast,
            Flag::Grayscale => self.grayscale,
            Flag::ReducedMotion => self.reduced_motion,
            Flag::FocusIndicators => self.focus_indicators,
            Flag::ScreenReader => self.screen_reader,
            Flag::KeyboardNavigation => self.keyboard_navigation,
            Flag::ColorBlind => self.color_blind,
            Flag::Dyslexia => self.dyslexia,
            Flag::DarkMode => self.dark_mode,
            Flag::FocusMode => self.focus_mode,
            Flag::UnderlineLinks => self.underline_links,
            Flag::ReadableFont => self.readable_font,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        *self.flag_mut(flag) = on;
    }

    pub fn toggle(&mut self, flag: Flag) {
        let value = self.flag_mut(flag);
        *value = !*value;
    }

    pub fn increase(&mut self, adjustment: Adjustment) {
        match adjustment {
            Adjustment::FontSize => {
                self.font_size = (self.font_size + PERCENT_STEP).min(FONT_SIZE_RANGE.1);
            }
            Adjustment::LineHeight => {
                self.line_height = (self.line_height + PERCENT_STEP).min(LINE_HEIGHT_RANGE.1);
            }
            Adjustment::LetterSpacing => {
                self.letter_spacing = (self.letter_spacing + SPACING_STEP).min(LETTER_SPACING_RANGE.1);
            }
        }
    }

    pub fn decrease(&mut self, adjustment: Adjustment) {
        match adjustment {
            Adjustment::FontSize => {
                self.font_size = self
                    .font_size
                    .saturating_sub(PERCENT_STEP)
                    .max(FONT_SIZE_RANGE.0);
            }
            Adjustment::LineHeight => {
                self.line_height = self
                    .line_height
                    .saturating_sub(PERCENT_STEP)
                    .max(LINE_HEIGHT_RANGE.0);
            }
            Adjustment::LetterSpacing => {
                self.letter_spacing = (self.letter_spacing - SPACING_STEP).max(LETTER_SPACING_RANGE.0);
            }
        }
    }

    /// Merges the preset over the current settings; fields the preset does
    /// not mention keep their value.
    pub fn apply_profile(&mut self, profile: Profile) {
        match profile {
            Profile::Dyslexia => {
                self.font_size = 120;
                self.line_height = 160;
                self.letter_spacing = 1.0;
                self.dyslexia = true;
                self.readable_font = true;
                self.underline_links = true;
                self.dark_mode = true;
            }
            Profile::LowVision => {
                self.font_size = 150;
                self.line_height = 140;
                self.letter_spacing = 0.5;
                self.high_contrast = true;
                self.underline_links = true;
                self.focus_indicators = true;
            }
            Profile::MotorControl => {
                self.focus_indicators = true;
                self.keyboard_navigation = true;
                self.reduced_motion = true;
                self.underline_links = true;
            }
            Profile::Reading => {
                self.font_size = 110;
                self.line_height = 150;
                self.letter_spacing = 0.5;
                self.focus_mode = true;
                self.dark_mode = true;
            }
        }
    }

    /// Every body class with whether it should currently be present.
    pub fn body_classes(&self) -> Vec<(&'static str, bool)> {
        Flag::ALL
            .iter()
            .filter_map(|&flag| flag.body_class().map(|class| (class, self.flag(flag))))
            .collect()
    }

    pub fn root_font_size(&self) -> String {
        format!("{}%", self.font_size)
    }

    pub fn body_line_height(&self) -> String {
        format!("{}%", self.line_height)
    }

    pub fn body_letter_spacing(&self) -> String {
        format!("{}px", self.letter_spacing)
    }

    pub fn body_filter(&self) -> &'static str {
        if self.grayscale {
            "grayscale(100%)"
        } else {
            "none"
        }
    }
}
