//! Display object types.
//!
//! Every widget placed on a Genie form belongs to one of these types; the
//! object field of report and event frames carries the type's wire value.

/// Object types addressable on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Object {
    Dipswitch,
    Knob,
    Rockerswitch,
    Rotaryswitch,
    Slider,
    Trackbar,
    Winbutton,
    AngularMeter,
    CoolGauge,
    Customdigits,
    Form,
    Gauge,
    Image,
    Keyboard,
    Led,
    LedDigits,
    Meter,
    Strings,
    Thermometer,
    UserLed,
    Video,
    StaticText,
    Sound,
    Timer,
    Spectrum,
    Scope,
    Tank,
    UserImages,
    PinOutput,
    PinInput,
    Button4D,
    AniButton,
    ColorPicker,
    UserButton,
}

impl Object {
    /// Parse an object type from its wire value
    pub fn from_u8(value: u8) -> Option<Self> {
        use Object::*;
        Some(match value {
            0 => Dipswitch,
            1 => Knob,
            2 => Rockerswitch,
            3 => Rotaryswitch,
            4 => Slider,
            5 => Trackbar,
            6 => Winbutton,
            7 => AngularMeter,
            8 => CoolGauge,
            9 => Customdigits,
            10 => Form,
            11 => Gauge,
            12 => Image,
            13 => Keyboard,
            14 => Led,
            15 => LedDigits,
            16 => Meter,
            17 => Strings,
            18 => Thermometer,
            19 => UserLed,
            20 => Video,
            21 => StaticText,
            22 => Sound,
            23 => Timer,
            24 => Spectrum,
            25 => Scope,
            26 => Tank,
            27 => UserImages,
            28 => PinOutput,
            29 => PinInput,
            30 => Button4D,
            31 => AniButton,
            32 => ColorPicker,
            33 => UserButton,
            _ => return None,
        })
    }

    /// Convert to the wire value
    pub fn to_u8(self) -> u8 {
        use Object::*;
        match self {
            Dipswitch => 0,
            Knob => 1,
            Rockerswitch => 2,
            Rotaryswitch => 3,
            Slider => 4,
            Trackbar => 5,
            Winbutton => 6,
            AngularMeter => 7,
            CoolGauge => 8,
            Customdigits => 9,
            Form => 10,
            Gauge => 11,
            Image => 12,
            Keyboard => 13,
            Led => 14,
            LedDigits => 15,
            Meter => 16,
            Strings => 17,
            Thermometer => 18,
            UserLed => 19,
            Video => 20,
            StaticText => 21,
            Sound => 22,
            Timer => 23,
            Spectrum => 24,
            Scope => 25,
            Tank => 26,
            UserImages => 27,
            PinOutput => 28,
            PinInput => 29,
            Button4D => 30,
            AniButton => 31,
            ColorPicker => 32,
            UserButton => 33,
        }
    }

    /// True for input widgets that can push unsolicited event frames
    pub fn is_input(&self) -> bool {
        use Object::*;
        matches!(
            self,
            Dipswitch
                | Knob
                | Rockerswitch
                | Rotaryswitch
                | Slider
                | Trackbar
                | Winbutton
                | Keyboard
                | PinInput
                | Button4D
                | AniButton
                | ColorPicker
                | UserButton
        )
    }
}
