//! Weather conditions: the WMO code classifier and the four display tags.

use colored::Color;

/// Map a WMO-style weather code to a label.
///
/// Ranges are checked top-down and the first match wins. Negative codes land in
/// the `<= 3` arm and come out as "Partly cloudy"; callers depend on this table
/// matching the provider convention exactly, so that is left as is.
pub fn classify(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        c if c <= 3 => "Partly cloudy",
        c if c <= 49 => "Foggy",
        c if c <= 59 => "Drizzle",
        c if c <= 69 => "Rain",
        c if c <= 79 => "Snow",
        c if c <= 84 => "Rain showers",
        c if c <= 86 => "Snow showers",
        c if c <= 99 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Canonical condition tag used by the art and compact renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Condition {
    Sunny,
    Rainy,
    #[default]
    Cloudy,
    Snowy,
}

/// Everything the art renderer needs to draw one condition.
#[derive(Debug, Clone, Copy)]
pub struct ConditionStyle {
    pub art: &'static [&'static str],
    pub color: Color,
    pub label: &'static str,
    pub icon: &'static str,
}

static SUNNY: ConditionStyle = ConditionStyle {
    art: &[
        "       \\   |   /       ",
        "         .-'-.         ",
        "    --- (     ) ---    ",
        "         `-.-'         ",
        "       /   |   \\       ",
    ],
    color: Color::Yellow,
    label: "Sunny",
    icon: "☀",
};

static RAINY: ConditionStyle = ConditionStyle {
    art: &[
        "       .-~~~-.         ",
        "      (       )        ",
        "    (          )       ",
        "     `-.___.-'         ",
        "      ' ' ' ' '        ",
        "     ' ' ' ' '         ",
    ],
    color: Color::Blue,
    label: "Rainy",
    icon: "🌧",
};

static CLOUDY: ConditionStyle = ConditionStyle {
    art: &[
        "                       ",
        "       .-~~~-.         ",
        "      (       )        ",
        "    (          )       ",
        "     `-.___.-'         ",
        "                       ",
    ],
    color: Color::BrightBlack,
    label: "Cloudy",
    icon: "☁",
};

static SNOWY: ConditionStyle = ConditionStyle {
    art: &[
        "       .-~~~-.         ",
        "      (       )        ",
        "    (          )       ",
        "     `-.___.-'         ",
        "      *  *  *  *       ",
        "     *  *  *  *        ",
    ],
    color: Color::Cyan,
    label: "Snowy",
    icon: "❄",
};

impl Condition {
    pub const fn all() -> &'static [Condition] {
        &[Condition::Sunny, Condition::Rainy, Condition::Cloudy, Condition::Snowy]
    }

    pub fn style(&self) -> &'static ConditionStyle {
        match self {
            Condition::Sunny => &SUNNY,
            Condition::Rainy => &RAINY,
            Condition::Cloudy => &CLOUDY,
            Condition::Snowy => &SNOWY,
        }
    }

    /// Map free text (classifier labels, wttr.in descriptions) onto a tag.
    ///
    /// Matching is by keyword, snow first so "rain and snow" reads as snowy.
    /// Text that matches nothing is [`Condition::Cloudy`].
    pub fn from_label(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["snow", "sleet", "ice", "blizzard", "hail"]) {
            Condition::Snowy
        } else if has(&["rain", "drizzle", "shower", "thunder"]) {
            Condition::Rainy
        } else if has(&["clear", "sunny"]) {
            Condition::Sunny
        } else {
            Condition::Cloudy
        }
    }
}
