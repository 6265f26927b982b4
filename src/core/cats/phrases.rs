// Playful one-liners shown under each tag suggestion.

use rand::seq::SliceRandom;
use rand::Rng;

const INTROS: [&str; 6] = ["Elígeme,", "¡Yo!", "Hola,", "Mírame,", "¡Aquí!", "Psst..."];

const PERSUASIONS: [&str; 6] = [
    "Soy el más rápido.",
    "Te divertirás.",
    "Funciono perfecto.",
    "¡No lo lamentarás!",
    "Soy impecable.",
    "¿Por qué no yo?",
];

const CLOSERS: [&str; 6] = [
    "¡Prometido!",
    "¿Sí?",
    "¡Escógeme!",
    "¿Qué dices?",
    "¡Por favor!",
    "Es destino.",
];

const SPECIAL_PHRASES: [&str; 3] = [
    "¡Soy el elemento 👑 del grupo!",
    "Tengo los bits de la suerte.",
    "¡Hazle caso a tu intuición!",
];

/// Chance of picking a special phrase instead of composing one.
const SPECIAL_PHRASE_PROBABILITY: f64 = 0.2;

fn pick<R: Rng + ?Sized>(options: &[&'static str], rng: &mut R) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Generates a short persuasive phrase, e.g. "Hola, ¡Prometido!".
pub fn generate_curious_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.gen_bool(SPECIAL_PHRASE_PROBABILITY) {
        return pick(&SPECIAL_PHRASES, rng).to_string();
    }

    let intro = pick(&INTROS, rng);
    let persuasion = pick(&PERSUASIONS, rng);
    let closer = pick(&CLOSERS, rng);

    match rng.gen_range(0..3) {
        0 => format!("{} {}", intro, persuasion),
        1 => format!("{} {}", persuasion, closer),
        _ => format!("{} {}", intro, closer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn phrases_come_from_known_parts() {
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let phrase = generate_curious_phrase(&mut rng);
            let known = SPECIAL_PHRASES.contains(&phrase.as_str())
                || INTROS
                    .iter()
                    .chain(PERSUASIONS.iter())
                    .any(|start| phrase.starts_with(start));
            assert!(known, "unexpected phrase: {phrase}");
        }
    }

    #[test]
    fn phrases_are_deterministic_for_a_seed() {
        let a = generate_curious_phrase(&mut StdRng::seed_from_u64(5));
        let b = generate_curious_phrase(&mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
