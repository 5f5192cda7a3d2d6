use std::fmt;
use std::ops::RangeInclusive;

/// Largest quarter-turn multiple that fits in `i32`.
const MAX_ROTATION: i32 = i32::MAX - i32::MAX % 90;

/// One of the six range-bounded filter knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterField {
    #[default]
    Brightness,
    Saturation,
    Inversion,
    Grayscale,
    Blur,
    Contrast,
}

impl FilterField {
    /// Selector order, which is also the order filters are composited in.
    pub const ALL: [Self; 6] = [
        Self::Brightness,
        Self::Saturation,
        Self::Inversion,
        Self::Grayscale,
        Self::Blur,
        Self::Contrast,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Saturation => "Saturation",
            Self::Inversion => "Inversion",
            Self::Grayscale => "Grayscale",
            Self::Blur => "Blur",
            Self::Contrast => "Contrast",
        }
    }

    pub const fn max(self) -> f32 {
        match self {
            Self::Brightness | Self::Saturation | Self::Contrast => 200.0,
            Self::Inversion | Self::Grayscale => 100.0,
            Self::Blur => 10.0,
        }
    }

    /// Valid slider range; every field starts at zero.
    pub const fn range(self) -> RangeInclusive<f32> {
        0.0..=self.max()
    }

    pub const fn default_value(self) -> f32 {
        match self {
            Self::Brightness | Self::Saturation | Self::Contrast => 100.0,
            Self::Inversion | Self::Grayscale | Self::Blur => 0.0,
        }
    }

    /// Unit suffix used when printing a value of this field.
    pub const fn unit_suffix(self) -> &'static str {
        match self {
            Self::Blur => "px",
            _ => "%",
        }
    }

    pub fn format_value(self, value: f32) -> String {
        format!("{}{}", value.round(), self.unit_suffix())
    }

    /// Clamp a raw input into range. NaN falls back to the default.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default_value();
        }
        value.clamp(0.0, self.max())
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mirror state along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    Normal,
    Mirrored,
}

impl Flip {
    /// Scale factor applied along the axis: `1` or `-1`.
    pub const fn sign(self) -> i8 {
        match self {
            Self::Normal => 1,
            Self::Mirrored => -1,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Mirrored,
            Self::Mirrored => Self::Normal,
        }
    }

    pub const fn is_mirrored(self) -> bool {
        matches!(self, Self::Mirrored)
    }
}

/// Current value of every filter and transform knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterState {
    brightness: f32,
    saturation: f32,
    inversion: f32,
    grayscale: f32,
    blur: f32,
    contrast: f32,
    rotation: i32,
    flip_horizontal: Flip,
    flip_vertical: Flip,
}

impl Default for ParameterState {
    fn default() -> Self {
        Self {
            brightness: FilterField::Brightness.default_value(),
            saturation: FilterField::Saturation.default_value(),
            inversion: FilterField::Inversion.default_value(),
            grayscale: FilterField::Grayscale.default_value(),
            blur: FilterField::Blur.default_value(),
            contrast: FilterField::Contrast.default_value(),
            rotation: 0,
            flip_horizontal: Flip::Normal,
            flip_vertical: Flip::Normal,
        }
    }
}

impl ParameterState {
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    pub const fn get(&self, field: FilterField) -> f32 {
        match field {
            FilterField::Brightness => self.brightness,
            FilterField::Saturation => self.saturation,
            FilterField::Inversion => self.inversion,
            FilterField::Grayscale => self.grayscale,
            FilterField::Blur => self.blur,
            FilterField::Contrast => self.contrast,
        }
    }

    /// Store a filter value, silently clamped into the field's range.
    pub fn set(&mut self, field: FilterField, value: f32) {
        let value = field.clamp(value);
        let slot = match field {
            FilterField::Brightness => &mut self.brightness,
            FilterField::Saturation => &mut self.saturation,
            FilterField::Inversion => &mut self.inversion,
            FilterField::Grayscale => &mut self.grayscale,
            FilterField::Blur => &mut self.blur,
            FilterField::Contrast => &mut self.contrast,
        };
        *slot = value;
    }

    #[must_use]
    pub fn with(mut self, field: FilterField, value: f32) -> Self {
        self.set(field, value);
        self
    }

    /// Accumulated rotation in degrees. Not wrapped.
    pub const fn rotation(&self) -> i32 {
        self.rotation
    }

    pub const fn set_rotation(&mut self, degrees: i32) {
        // Only quarter turns are representable.
        self.rotation = degrees - degrees % 90;
    }

    pub const fn rotate_left(&mut self) {
        if self.rotation > -MAX_ROTATION {
            self.rotation -= 90;
        }
    }

    pub const fn rotate_right(&mut self) {
        if self.rotation < MAX_ROTATION {
            self.rotation += 90;
        }
    }

    /// Visual rotation as clockwise quarter turns in `0..4`.
    pub const fn quarter_turns(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            (self.rotation.rem_euclid(360) / 90) as u8
        }
    }

    pub const fn flip_horizontal(&self) -> Flip {
        self.flip_horizontal
    }

    pub const fn flip_vertical(&self) -> Flip {
        self.flip_vertical
    }

    pub const fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = self.flip_horizontal.toggled();
    }

    pub const fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = self.flip_vertical.toggled();
    }

    pub const fn has_geometry(&self) -> bool {
        self.quarter_turns() != 0
            || self.flip_horizontal.is_mirrored()
            || self.flip_vertical.is_mirrored()
    }

    /// True when rendering would reproduce the source pixels unchanged.
    pub fn is_identity(&self) -> bool {
        !self.has_geometry()
            && FilterField::ALL
                .iter()
                .all(|&field| (self.get(field) - field.default_value()).abs() <= f32::EPSILON)
    }
}
