/// Lowercase vowels, including the accented ones of Spanish orthography.
const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'á', 'é', 'í', 'ó', 'ú'];

const SEED_MODULUS: u64 = 10_000;
const MIN_POINT_BUDGET: u64 = 300;
const POINTS_PER_CHAR: u64 = 15;

/// Numeric features derived from one input text.
///
/// This is a pure function of the text's code points: identical text always yields
/// identical features, and therefore an identical trace.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextFeatures {
    /// Number of characters (Unicode scalar values).
    pub length: u64,
    /// Vowels, accented ones included.
    pub vowel_count: u64,
    /// Alphabetic characters that are not vowels.
    pub consonant_count: u64,
    /// Whitespace-separated words.
    pub word_count: u64,
    /// Literal `' '` characters.
    pub space_count: u64,
    /// `'!'` characters (`'¡'` is not counted).
    pub exclamation_count: u64,
    /// `'?'` characters (`'¿'` is not counted).
    pub question_count: u64,
    /// `'.'` characters.
    pub period_count: u64,
    /// `1.5 * exclamations + 0.8 * questions`.
    pub intensity: f64,
    /// `0.7 * periods`.
    pub calm: f64,
    /// `max(0.5, vowels / 7)`.
    pub wave_frequency_base: f64,
    /// `max(0.1, consonants / 15)`.
    pub wave_amplitude_base: f64,
    /// `max(300, length * 15)`: total points the phase planner distributes.
    pub point_budget: u64,
    /// Sum of code points modulo 10000.
    pub seed: u64,
}

/// Extract [`TextFeatures`] from arbitrary text. Total: the empty string is valid input.
pub fn extract(text: &str) -> TextFeatures {
    let length = text.chars().count() as u64;

    let mut vowel_count = 0u64;
    let mut consonant_count = 0u64;
    for c in text.to_lowercase().chars() {
        if VOWELS.contains(&c) {
            vowel_count += 1;
        } else if c.is_alphabetic() {
            consonant_count += 1;
        }
    }

    let count = |needle: char| text.chars().filter(|&c| c == needle).count() as u64;
    let exclamation_count = count('!');
    let question_count = count('?');
    let period_count = count('.');

    let seed = text.chars().map(|c| u64::from(u32::from(c))).sum::<u64>() % SEED_MODULUS;

    TextFeatures {
        length,
        vowel_count,
        consonant_count,
        word_count: text.split_whitespace().count() as u64,
        space_count: count(' '),
        exclamation_count,
        question_count,
        period_count,
        intensity: exclamation_count as f64 * 1.5 + question_count as f64 * 0.8,
        calm: period_count as f64 * 0.7,
        wave_frequency_base: (vowel_count as f64 / 7.0).max(0.5),
        wave_amplitude_base: (consonant_count as f64 / 15.0).max(0.1),
        point_budget: length.saturating_mul(POINTS_PER_CHAR).max(MIN_POINT_BUDGET),
        seed,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/features/extract.rs"]
mod tests;
