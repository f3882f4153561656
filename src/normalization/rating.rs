use serde::Serialize;
use tracing::debug;

/// Display configuration for a rating provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingSource {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub text_color: &'static str,
    /// Upper end of the provider's native scale, shown under the progress bar.
    pub max_value: u32,
}

impl RatingSource {
    pub const fn new(
        name: &'static str,
        icon: &'static str,
        color: &'static str,
        bg_color: &'static str,
        text_color: &'static str,
        max_value: u32,
    ) -> Self {
        Self {
            name,
            icon,
            color,
            bg_color,
            text_color,
            max_value,
        }
    }

    /// Resolve a provider label to its display config.
    ///
    /// Labels are matched exactly; anything unknown gets [`DEFAULT_RATING_SOURCE`].
    pub fn lookup(label: &str) -> &'static RatingSource {
        match RATING_SOURCES.iter().find(|(key, _)| *key == label) {
            Some((_, source)) => source,
            None => {
                debug!(
                    target = "normalization",
                    label, "unknown rating source; using default display config"
                );
                &DEFAULT_RATING_SOURCE
            }
        }
    }
}

/// Known providers keyed by the label the metadata API reports.
pub static RATING_SOURCES: &[(&str, RatingSource)] = &[
    (
        "Internet Movie Database",
        RatingSource::new(
            "IMDb",
            "🎬",
            "bg-yellow-500",
            "bg-yellow-50",
            "text-yellow-800",
            10,
        ),
    ),
    (
        "Rotten Tomatoes",
        RatingSource::new(
            "Rotten Tomatoes",
            "🍅",
            "bg-red-500",
            "bg-red-50",
            "text-red-800",
            100,
        ),
    ),
    (
        "Metacritic",
        RatingSource::new(
            "Metacritic",
            "📊",
            "bg-green-500",
            "bg-green-50",
            "text-green-800",
            100,
        ),
    ),
];

pub static DEFAULT_RATING_SOURCE: RatingSource = RatingSource::new(
    "Rating",
    "⭐",
    "bg-blue-500",
    "bg-blue-50",
    "text-blue-800",
    10,
);

/// Qualitative bucket for a 0-100 percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingQuality {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Poor,
}

/// Inclusive lower bounds, checked top-down. Below the last entry is `Poor`.
const QUALITY_THRESHOLDS: [(f64, RatingQuality); 4] = [
    (80.0, RatingQuality::Excellent),
    (70.0, RatingQuality::Good),
    (60.0, RatingQuality::Average),
    (40.0, RatingQuality::BelowAverage),
];

impl RatingQuality {
    pub fn from_percentage(percentage: f64) -> Self {
        QUALITY_THRESHOLDS
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, quality)| *quality)
            .unwrap_or(RatingQuality::Poor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingQuality::Excellent => "Excellent",
            RatingQuality::Good => "Good",
            RatingQuality::Average => "Average",
            RatingQuality::BelowAverage => "Below Average",
            RatingQuality::Poor => "Poor",
        }
    }
}

/// How a raw rating string is interpreted. Detection order is fixed:
/// a `%` anywhere wins over a `/`, which wins over a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFormat {
    /// "85%"
    Percentage,
    /// "8.5/10", "74/100"
    Fraction,
    /// "7.8" (out of 10) or "85" (out of 100)
    Decimal,
}

impl RatingFormat {
    pub fn detect(value: &str) -> Self {
        if value.contains('%') {
            RatingFormat::Percentage
        } else if value.contains('/') {
            RatingFormat::Fraction
        } else {
            RatingFormat::Decimal
        }
    }
}

/// A provider rating mapped onto the common 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRating {
    pub source: &'static RatingSource,
    /// The provider's value exactly as received; this is what gets displayed.
    pub display: String,
    /// Always within `[0, 100]`.
    pub percentage: f64,
    pub quality: RatingQuality,
}

impl NormalizedRating {
    pub fn source_name(&self) -> &'static str {
        self.source.name
    }

    pub fn icon(&self) -> &'static str {
        self.source.icon
    }

    /// The percentage folded back onto a 0-10 scale.
    pub fn out_of_ten(&self) -> f64 {
        self.percentage / 10.0
    }
}

/// Map a raw provider rating onto the 0-100 scale.
///
/// Never fails: values that cannot be read as a number come back as 0% with
/// their original text preserved in [`NormalizedRating::display`].
pub fn normalize_rating(raw_value: &str, source_label: &str) -> NormalizedRating {
    let percentage = rating_percentage(raw_value);
    NormalizedRating {
        source: RatingSource::lookup(source_label),
        display: raw_value.to_string(),
        percentage,
        quality: RatingQuality::from_percentage(percentage),
    }
}

/// Clamped 0-100 percentage for a raw value; unparseable input yields 0.
pub fn rating_percentage(raw_value: &str) -> f64 {
    match parse_rating(raw_value) {
        Some(n) => n.clamp(0.0, 100.0),
        None => {
            debug!(
                target = "normalization",
                raw_value, "rating value has no numeric reading; treating as 0"
            );
            0.0
        }
    }
}

/// Unclamped percentage reading of a raw value, or `None` when it has no
/// numeric interpretation.
pub fn parse_rating(raw_value: &str) -> Option<f64> {
    let numeric = match RatingFormat::detect(raw_value) {
        RatingFormat::Percentage => parse_leading_f64(&raw_value.replacen('%', "", 1)),
        RatingFormat::Fraction => {
            let mut parts = raw_value.split('/');
            let numerator = parts.next().and_then(parse_leading_f64);
            let denominator = parts.next().and_then(parse_leading_f64);
            match (numerator, denominator) {
                (Some(n), Some(d)) => Some(n / d * 100.0),
                _ => None,
            }
        }
        // Values up to 10 are read as out-of-10; so "10" is 100%, not 10%.
        RatingFormat::Decimal => {
            parse_leading_f64(raw_value).map(|n| if n <= 10.0 { n * 10.0 } else { n })
        }
    };

    numeric.filter(|n| !n.is_nan())
}

/// Parse the longest numeric prefix of `input`, ignoring leading whitespace.
///
/// "7.8 stars" -> 7.8, "-3" -> -3.0, ".5" -> 0.5, "N/A" -> None.
/// Only digit forms are read, so "Infinity" and "inf" are `None`.
pub(crate) fn parse_leading_f64(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Pick the rating a movie card should headline.
///
/// The first source whose label contains "imdb" wins, then "rotten", then
/// whatever came first. Matching is a case-insensitive substring check, so the
/// provider's "Internet Movie Database" label does not count as "imdb".
pub fn primary_rating<'a, T, F>(ratings: &'a [T], source_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    let source_contains = |needle: &str| {
        ratings
            .iter()
            .find(|r| source_of(*r).to_lowercase().contains(needle))
    };
    source_contains("imdb")
        .or_else(|| source_contains("rotten"))
        .or_else(|| ratings.first())
}

/// Compact badge text such as "🍅 91%".
pub fn rating_badge(source_label: &str, raw_value: &str) -> String {
    let source = source_label.to_lowercase();
    let icon = if source.contains("imdb") {
        "⭐"
    } else if source.contains("rotten") {
        "🍅"
    } else if source.contains("metacritic") {
        "📊"
    } else {
        "⭐"
    };
    format!("{icon} {raw_value}")
}

/// Text colour tier for a 0-10 normalized value.
pub fn rating_color(normalized_value: Option<f64>) -> &'static str {
    match normalized_value {
        None => "text-gray-600",
        Some(v) if v >= 8.0 => "text-green-600",
        Some(v) if v >= 6.0 => "text-yellow-600",
        Some(v) if v >= 4.0 => "text-orange-600",
        Some(_) => "text-red-600",
    }
}
