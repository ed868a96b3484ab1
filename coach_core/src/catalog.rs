//! Default catalog of exercises.
//!
//! The catalog is a plain repository value handed to every component that
//! needs exercises. Order is significant: plan generation picks the first
//! eligible exercise, so exercises are kept in insertion order.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// An ordered collection of exercises
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}

/// Criteria for `Catalog::filter`; `None`/empty fields match everything
#[derive(Clone, Debug, Default)]
pub struct ExerciseFilter {
    pub category: Option<ExerciseCategory>,
    /// Matches exercises targeting at least one of these groups
    pub muscle_groups: Vec<String>,
    /// Matches exercises that need nothing outside this set
    pub equipment: Option<Vec<String>>,
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn by_category(&self, category: ExerciseCategory) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter().filter(move |e| e.category == category)
    }

    /// Look up several exercises, skipping unknown ids
    pub fn pick(&self, ids: &[&str]) -> Vec<Exercise> {
        ids.iter().filter_map(|id| self.get(id)).cloned().collect()
    }

    pub fn filter(&self, filter: &ExerciseFilter) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| filter.category.map_or(true, |c| e.category == c))
            .filter(|e| {
                filter.muscle_groups.is_empty()
                    || e
                        .muscle_groups
                        .iter()
                        .any(|m| filter.muscle_groups.contains(m))
            })
            .filter(|e| {
                filter
                    .equipment
                    .as_ref()
                    .map_or(true, |available| e.fits_equipment(available))
            })
            .cloned()
            .collect()
    }

    /// Validate the catalog
    ///
    /// Returns a list of validation errors, or an empty vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise id '{}'", exercise.id));
            }
            if exercise.duration_minutes == 0 {
                errors.push(format!("Exercise '{}': duration is zero", exercise.id));
            }
            if exercise.calories_per_minute <= 0.0 {
                errors.push(format!(
                    "Exercise '{}': calories per minute {} is not positive",
                    exercise.id, exercise.calories_per_minute
                ));
            }
            if exercise.equipment.iter().any(|e| e == "none") {
                errors.push(format!(
                    "Exercise '{}': bodyweight exercises list no equipment",
                    exercise.id
                ));
            }
        }

        for category in ExerciseCategory::ALL {
            if self.by_category(category).next().is_none() {
                errors.push(format!("Catalog has no {:?} exercises", category));
            }
        }

        errors
    }
}

fn steps(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

fn modification(kind: ModificationKind, description: &str) -> ExerciseModification {
    ExerciseModification {
        kind,
        description: description.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn exercise(
    id: &str,
    name: &str,
    description: &str,
    category: ExerciseCategory,
    equipment: &[&str],
    difficulty: Difficulty,
    duration_minutes: u32,
    calories_per_minute: f64,
    muscle_groups: &[&str],
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        equipment: steps(equipment),
        difficulty,
        duration_minutes,
        calories_per_minute,
        instructions: Vec::new(),
        muscle_groups: steps(muscle_groups),
        modifications: Vec::new(),
    }
}

/// Builds the default catalog of built-in exercises
pub fn build_default_catalog() -> Catalog {
    use Difficulty::*;
    use ExerciseCategory::*;
    use ModificationKind::*;

    let mut exercises = Vec::new();

    // ========================================================================
    // Cardio
    // ========================================================================

    exercises.push(Exercise {
        instructions: steps(&[
            "Stand with feet together, arms at your sides",
            "Jump feet apart while raising arms overhead",
            "Jump back to the start and repeat at a steady pace",
        ]),
        modifications: vec![
            modification(Easier, "Step one foot out at a time instead of jumping"),
            modification(Harder, "Add a squat each time the feet land wide"),
            modification(InjuryAdaptation, "Keep arms below shoulder height"),
        ],
        ..exercise(
            "jumping_jacks",
            "Jumping Jacks",
            "Classic full-body warm-up that raises the heart rate quickly",
            Cardio,
            &[],
            Beginner,
            10,
            8.0,
            &["full_body", "calves", "shoulders"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Walk at a pace where talking is possible but effortful",
            "Swing the arms and keep the chest tall",
        ]),
        modifications: vec![modification(Harder, "Add one-minute uphill or stair segments")],
        ..exercise(
            "brisk_walk",
            "Brisk Walk",
            "Low-impact steady-state walking",
            Cardio,
            &[],
            Beginner,
            30,
            5.0,
            &["legs", "glutes"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Hold the handles at hip height",
            "Turn the rope with the wrists and hop just high enough to clear it",
        ]),
        modifications: vec![
            modification(Easier, "Shadow-skip without the rope"),
            modification(Harder, "Alternate single and double unders"),
        ],
        ..exercise(
            "jump_rope",
            "Jump Rope",
            "Rhythmic skipping for coordination and conditioning",
            Cardio,
            &["jump_rope"],
            Intermediate,
            15,
            12.0,
            &["calves", "shoulders", "core"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Jog easily for five minutes",
            "Alternate one minute fast with two minutes easy",
        ]),
        ..exercise(
            "running_intervals",
            "Running Intervals",
            "Alternating fast and easy running efforts",
            Cardio,
            &[],
            Intermediate,
            25,
            11.0,
            &["legs", "glutes", "core"],
        )
    });

    // ========================================================================
    // HIIT
    // ========================================================================

    exercises.push(Exercise {
        instructions: steps(&[
            "Start in a high plank",
            "Drive knees toward the chest one at a time as fast as form allows",
        ]),
        modifications: vec![modification(Easier, "Hands on a bench to reduce load")],
        ..exercise(
            "mountain_climbers",
            "Mountain Climbers",
            "Fast plank-based knee drives",
            Hiit,
            &[],
            Beginner,
            10,
            10.0,
            &["core", "shoulders", "hip_flexors"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Squat, kick the feet back to a plank",
            "Return the feet, stand and jump",
            "Work 40 seconds, rest 20 seconds",
        ]),
        modifications: vec![
            modification(Easier, "Step back instead of jumping, skip the jump"),
            modification(Harder, "Add a push-up at the bottom"),
        ],
        ..exercise(
            "burpee_intervals",
            "Burpee Intervals",
            "Timed burpee rounds for maximal conditioning",
            Hiit,
            &[],
            Intermediate,
            15,
            12.5,
            &["full_body", "chest", "legs"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Sprint in place for 20 seconds",
            "Rest 10 seconds, repeat eight rounds per block",
        ]),
        ..exercise(
            "tabata_sprints",
            "Tabata Sprints",
            "All-out 20/10 sprint intervals",
            Hiit,
            &[],
            Advanced,
            20,
            14.0,
            &["legs", "glutes", "core"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Hinge at the hips and swing the bell to chest height",
            "Snap the hips through, then rest as needed between rounds",
        ]),
        modifications: vec![modification(
            InjuryAdaptation,
            "Use a lighter bell and shorten the swing arc",
        )],
        ..exercise(
            "kettlebell_hiit",
            "Kettlebell Swing Circuit",
            "Explosive hip-hinge intervals",
            Hiit,
            &["kettlebell"],
            Advanced,
            20,
            13.0,
            &["glutes", "hamstrings", "core"],
        )
    });

    // ========================================================================
    // Strength
    // ========================================================================

    exercises.push(Exercise {
        instructions: steps(&[
            "Feet shoulder-width apart, toes slightly out",
            "Sit back and down until thighs are parallel",
            "Drive through the heels to stand",
        ]),
        modifications: vec![
            modification(Easier, "Squat to a chair"),
            modification(Harder, "Pause for three seconds at the bottom"),
            modification(InjuryAdaptation, "Limit depth to a pain-free range"),
        ],
        ..exercise(
            "bodyweight_squats",
            "Bodyweight Squats",
            "Foundational lower-body strength movement",
            Strength,
            &[],
            Beginner,
            15,
            6.0,
            &["quads", "glutes", "hamstrings"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Hands just wider than shoulders, body in a straight line",
            "Lower the chest to the floor and press back up",
        ]),
        modifications: vec![
            modification(Easier, "Hands elevated on a bench or wall"),
            modification(Harder, "Feet elevated"),
        ],
        ..exercise(
            "push_ups",
            "Push-Ups",
            "Bodyweight upper-body press",
            Strength,
            &[],
            Beginner,
            10,
            7.0,
            &["chest", "triceps", "shoulders"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Hinge forward with a flat back, dumbbells hanging",
            "Row the weights to the hips and lower under control",
        ]),
        ..exercise(
            "dumbbell_rows",
            "Dumbbell Rows",
            "Horizontal pull for the upper back",
            Strength,
            &["dumbbells"],
            Intermediate,
            20,
            6.5,
            &["back", "biceps"],
        )
    });

    exercises.push(Exercise {
        instructions: steps(&[
            "Hold the bell at the chest",
            "Squat between the knees and stand tall",
        ]),
        ..exercise(
            "goblet_squats",
            "Goblet Squats",
            "Front-loaded squat pattern",
            Strength,
            &["kettlebell"],
            Intermediate,
            20,
            7.5,
            &["quads", "glutes", "core"],
        )
    });

    exercises.push(exercise(
        "barbell_deadlift",
        "Barbell Deadlift",
        "Heavy posterior-chain pull from the floor",
        Strength,
        &["barbell"],
        Advanced,
        30,
        8.0,
        &["hamstrings", "glutes", "back"],
    ));

    // ========================================================================
    // Yoga
    // ========================================================================

    exercises.push(Exercise {
        instructions: steps(&[
            "Flow from mountain pose through forward fold to plank",
            "Lower to cobra, press to downward dog and step forward",
        ]),
        modifications: vec![modification(Easier, "Drop the knees in plank")],
        ..exercise(
            "sun_salutation",
            "Sun Salutation",
            "Gentle flowing sequence linking breath and movement",
            Yoga,
            &["yoga_mat"],
            Beginner,
            15,
            4.0,
            &["full_body", "back", "hamstrings"],
        )
    });

    exercises.push(exercise(
        "vinyasa_flow",
        "Vinyasa Flow",
        "Continuous standing and balance sequence",
        Yoga,
        &["yoga_mat"],
        Intermediate,
        30,
        5.0,
        &["full_body", "core"],
    ));

    exercises.push(exercise(
        "power_yoga",
        "Power Yoga",
        "Strength-focused vinyasa with long holds",
        Yoga,
        &["yoga_mat"],
        Advanced,
        45,
        6.0,
        &["full_body", "core", "shoulders"],
    ));

    exercises.push(Exercise {
        instructions: steps(&[
            "Kneel with hands under shoulders",
            "Alternate arching and rounding the spine with the breath",
            "Sink back into child's pose between rounds",
        ]),
        ..exercise(
            "cat_cow_child_pose",
            "Cat-Cow and Child's Pose",
            "Spinal mobility sequence that eases back tension",
            Yoga,
            &[],
            Beginner,
            10,
            2.5,
            &["back", "core"],
        )
    });

    // ========================================================================
    // Flexibility
    // ========================================================================

    exercises.push(Exercise {
        instructions: steps(&[
            "Hold each stretch for 30 seconds",
            "Move from neck to calves without bouncing",
        ]),
        ..exercise(
            "full_body_stretch",
            "Full Body Stretch",
            "Static stretching routine for every major muscle group",
            Flexibility,
            &[],
            Beginner,
            10,
            2.5,
            &["full_body"],
        )
    });

    exercises.push(exercise(
        "hip_mobility",
        "Hip Mobility Drills",
        "Controlled articular rotations and 90/90 transitions",
        Flexibility,
        &[],
        Beginner,
        10,
        3.0,
        &["hips", "glutes"],
    ));

    exercises.push(exercise(
        "band_assisted_stretch",
        "Band-Assisted Stretch",
        "Resistance-band hamstring and shoulder stretches",
        Flexibility,
        &["resistance_bands"],
        Beginner,
        15,
        3.0,
        &["hamstrings", "shoulders"],
    ));

    Catalog::new(exercises)
}
