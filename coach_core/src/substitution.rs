//! Injury-safe exercise substitution.
//!
//! Each injury category maps to one or more partial templates. A template
//! overrides category, muscle groups and (optionally) difficulty, and scales
//! the calorie rate down. Duration always comes from the original exercise.
//! Templates either need no equipment or inherit the original's, so a
//! substitute never asks for equipment the original did not.

use crate::{Difficulty, Exercise, ExerciseCategory, ExerciseModification, ModificationKind};

/// Equipment requirement of a substitute
#[derive(Clone, Copy, Debug)]
enum EquipmentRule {
    Bodyweight,
    SameAsOriginal,
}

struct SubstituteTemplate {
    name: &'static str,
    description: &'static str,
    category: ExerciseCategory,
    equipment: EquipmentRule,
    muscle_groups: &'static [&'static str],
    calorie_factor: f64,
    difficulty: Option<Difficulty>,
    instructions: &'static [&'static str],
}

struct InjuryEntry {
    injury: &'static str,
    templates: &'static [SubstituteTemplate],
}

const SUBSTITUTIONS: &[InjuryEntry] = &[
    InjuryEntry {
        injury: "knee_injury",
        templates: &[
            SubstituteTemplate {
                name: "Seated Upper Body Circuit",
                description: "Seated presses and raises that keep load off the knees",
                category: ExerciseCategory::Strength,
                equipment: EquipmentRule::SameAsOriginal,
                muscle_groups: &["chest", "shoulders", "arms"],
                calorie_factor: 0.6,
                difficulty: None,
                instructions: &[
                    "Sit tall on a stable chair",
                    "Alternate presses, rows and raises for 40 seconds each",
                ],
            },
            SubstituteTemplate {
                name: "Floor Core Sequence",
                description: "Supine core work with no knee flexion under load",
                category: ExerciseCategory::Flexibility,
                equipment: EquipmentRule::Bodyweight,
                muscle_groups: &["core"],
                calorie_factor: 0.5,
                difficulty: Some(Difficulty::Beginner),
                instructions: &["Dead bugs, glute bridges and side planks, 45 seconds each"],
            },
        ],
    },
    InjuryEntry {
        injury: "back_injury",
        templates: &[
            SubstituteTemplate {
                name: "Supported Bird Dog Series",
                description: "Neutral-spine stability work",
                category: ExerciseCategory::Flexibility,
                equipment: EquipmentRule::Bodyweight,
                muscle_groups: &["core", "back"],
                calorie_factor: 0.5,
                difficulty: Some(Difficulty::Beginner),
                instructions: &[
                    "Start on hands and knees",
                    "Extend opposite arm and leg slowly, hold for two breaths",
                ],
            },
            SubstituteTemplate {
                name: "Gentle Walking Intervals",
                description: "Upright low-impact cardio that avoids spinal flexion",
                category: ExerciseCategory::Cardio,
                equipment: EquipmentRule::Bodyweight,
                muscle_groups: &["legs"],
                calorie_factor: 0.7,
                difficulty: None,
                instructions: &["Walk briskly for three minutes, easy for one, repeat"],
            },
        ],
    },
    InjuryEntry {
        injury: "shoulder_injury",
        templates: &[
            SubstituteTemplate {
                name: "Lower Body Bodyweight Circuit",
                description: "Squats, lunges and bridges with arms unloaded",
                category: ExerciseCategory::Strength,
                equipment: EquipmentRule::Bodyweight,
                muscle_groups: &["quads", "glutes", "hamstrings"],
                calorie_factor: 0.8,
                difficulty: None,
                instructions: &["Rotate squats, reverse lunges and glute bridges"],
            },
            SubstituteTemplate {
                name: "Stationary March",
                description: "High-knee marching with hands on hips",
                category: ExerciseCategory::Cardio,
                equipment: EquipmentRule::Bodyweight,
                muscle_groups: &["legs", "hip_flexors"],
                calorie_factor: 0.6,
                difficulty: Some(Difficulty::Beginner),
                instructions: &["March in place, driving the knees to hip height"],
            },
        ],
    },
    InjuryEntry {
        injury: "wrist_injury",
        templates: &[SubstituteTemplate {
            name: "Standing Leg Strength",
            description: "Weight-bearing leg work without loading the hands",
            category: ExerciseCategory::Strength,
            equipment: EquipmentRule::Bodyweight,
            muscle_groups: &["quads", "glutes", "calves"],
            calorie_factor: 0.75,
            difficulty: None,
            instructions: &["Split squats, calf raises and wall sits"],
        }],
    },
];

/// Injury categories with substitution templates
pub fn known_injuries() -> impl Iterator<Item = &'static str> {
    SUBSTITUTIONS.iter().map(|entry| entry.injury)
}

fn build_substitute(
    original: &Exercise,
    injury: &str,
    index: usize,
    t: &SubstituteTemplate,
) -> Exercise {
    let equipment = match t.equipment {
        EquipmentRule::Bodyweight => Vec::new(),
        EquipmentRule::SameAsOriginal => original.equipment.clone(),
    };

    Exercise {
        id: format!("{}_{}_alt{}", original.id, injury, index + 1),
        name: t.name.into(),
        description: t.description.into(),
        category: t.category,
        equipment,
        difficulty: t.difficulty.unwrap_or(original.difficulty),
        duration_minutes: original.duration_minutes,
        calories_per_minute: original.calories_per_minute * t.calorie_factor,
        instructions: t.instructions.iter().map(|s| s.to_string()).collect(),
        muscle_groups: t.muscle_groups.iter().map(|s| s.to_string()).collect(),
        modifications: vec![ExerciseModification {
            kind: ModificationKind::InjuryAdaptation,
            description: format!("Substitute for {} ({})", original.name, injury),
        }],
    }
}

/// Alternatives to `exercise` that are safe for `injury`
///
/// Unknown injury categories yield an empty list.
pub fn alternatives(exercise: &Exercise, injury: &str) -> Vec<Exercise> {
    let key = injury.trim().to_lowercase();
    let Some(entry) = SUBSTITUTIONS.iter().find(|e| e.injury == key) else {
        tracing::warn!("No substitutions known for injury category '{}'", injury);
        return Vec::new();
    };

    entry
        .templates
        .iter()
        .enumerate()
        .map(|(i, t)| build_substitute(exercise, entry.injury, i, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;

    fn exercise(id: &str) -> Exercise {
        build_default_catalog().get(id).unwrap().clone()
    }

    #[test]
    fn test_unknown_injury_is_empty() {
        assert!(alternatives(&exercise("bodyweight_squats"), "unknown_injury").is_empty());
    }

    #[test]
    fn test_knee_alternatives_preserve_timing() {
        let squats = exercise("bodyweight_squats");
        let alts = alternatives(&squats, "knee_injury");

        assert_eq!(alts.len(), 2);
        for alt in &alts {
            assert_eq!(alt.duration_minutes, squats.duration_minutes);
            assert!(alt.calories_per_minute < squats.calories_per_minute);
        }
        // First template keeps the original difficulty, second overrides it
        assert_eq!(alts[0].difficulty, squats.difficulty);
        assert_eq!(alts[1].difficulty, Difficulty::Beginner);
    }

    #[test]
    fn test_difficulty_inherited_unless_overridden() {
        let rows = exercise("dumbbell_rows");
        let alts = alternatives(&rows, "shoulder_injury");

        assert_eq!(alts[0].difficulty, Difficulty::Intermediate);
        assert_eq!(alts[1].difficulty, Difficulty::Beginner);
    }

    #[test]
    fn test_substitutes_never_add_equipment() {
        let catalog = build_default_catalog();
        for original in &catalog.exercises {
            for injury in known_injuries() {
                for alt in alternatives(original, injury) {
                    assert!(
                        alt.fits_equipment(&original.equipment),
                        "{} needs equipment {} does not",
                        alt.id,
                        original.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_injury_lookup_is_case_insensitive() {
        let alts = alternatives(&exercise("burpee_intervals"), "Back_Injury");
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].id, "burpee_intervals_back_injury_alt1");
        assert_eq!(alts[1].category, ExerciseCategory::Cardio);
    }
}
