use super::*;

#[test]
fn empty_text_hits_every_floor() {
    let f = extract("");
    assert_eq!(f.length, 0);
    assert_eq!(f.vowel_count, 0);
    assert_eq!(f.consonant_count, 0);
    assert_eq!(f.word_count, 0);
    assert_eq!(f.space_count, 0);
    assert_eq!(f.intensity, 0.0);
    assert_eq!(f.calm, 0.0);
    assert_eq!(f.wave_frequency_base, 0.5);
    assert_eq!(f.wave_amplitude_base, 0.1);
    assert_eq!(f.point_budget, 300);
    assert_eq!(f.seed, 0);
}

#[test]
fn exclamation_heavy_spanish_text() {
    let f = extract("¡Sí! ¡Vamos! ¡Ahora!");
    assert_eq!(f.exclamation_count, 3);
    assert_eq!(f.question_count, 0);
    assert_eq!(f.period_count, 0);
    assert_eq!(f.intensity, 4.5);
    assert_eq!(f.calm, 0.0);
    assert_eq!(f.word_count, 3);
    assert_eq!(f.space_count, 2);
    assert_eq!(f.length, 20);
}

#[test]
fn accented_vowels_count_as_vowels() {
    // s, c, n are consonants; í, ó, a, ú, é are vowels.
    let f = extract("Sí canción ÚÉ");
    assert_eq!(f.vowel_count, 6);
    assert_eq!(f.consonant_count, 5);
    assert_eq!(f.wave_frequency_base, (6.0f64 / 7.0).max(0.5));
    assert_eq!(f.wave_amplitude_base, (5.0f64 / 15.0).max(0.1));
}

#[test]
fn punctuation_tallies_feed_intensity_and_calm() {
    let f = extract("Hola? Bien. Muy bien... De verdad?!");
    assert_eq!(f.question_count, 2);
    assert_eq!(f.exclamation_count, 1);
    assert_eq!(f.period_count, 4);
    assert!((f.intensity - (1.5 + 1.6)).abs() < 1e-12);
    assert!((f.calm - 2.8).abs() < 1e-12);
}

#[test]
fn seed_is_code_point_sum_mod_10000() {
    assert_eq!(extract("A").seed, 65);
    assert_eq!(extract("AB").seed, 131);
    let long: String = std::iter::repeat('z').take(100).collect();
    assert_eq!(extract(&long).seed, (122 * 100) % 10_000);
}

#[test]
fn budget_scales_with_length_above_floor() {
    assert_eq!(extract(&"a".repeat(20)).point_budget, 300);
    assert_eq!(extract(&"a".repeat(21)).point_budget, 315);
    assert_eq!(extract(&"ñ".repeat(40)).point_budget, 600);
}

#[test]
fn more_exclamations_never_lower_intensity() {
    let mut prev = extract("hola").intensity;
    let mut text = String::from("hola");
    for _ in 0..8 {
        text.push('!');
        let next = extract(&text).intensity;
        assert!(next >= prev);
        prev = next;
    }
}

#[test]
fn more_periods_never_lower_calm() {
    let mut prev = extract("hola").calm;
    let mut text = String::from("hola");
    for _ in 0..8 {
        text.push('.');
        let next = extract(&text).calm;
        assert!(next >= prev);
        prev = next;
    }
}

#[test]
fn identical_text_yields_identical_features() {
    let t = "El río suena. ¿Me escuchas?";
    assert_eq!(extract(t), extract(t));
}
