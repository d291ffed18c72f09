//! # Rule-Based Fallback Plans
//!
//! Deterministic plan generation used whenever the external model is
//! unconfigured, exhausted its retries, or returned something unreadable.
//! Identical input always produces the identical plan, and nothing in this
//! module can fail.

use fitclub_core::models::recommendation::{
    Equipment, FitnessGoal, Measurements, RecommendationPlan,
};

use crate::input::RecommendationInput;

/// Model name recorded in the log for rule-based results.
pub const FALLBACK_MODEL: &str = "fallback";

pub fn generate_fallback(input: &RecommendationInput) -> RecommendationPlan {
    match input {
        RecommendationInput::Measurements(measurements) => plan_from_measurements(measurements),
        RecommendationInput::Photo { .. } => photo_plan(),
    }
}

/// Plan used when the pipeline itself hits an unexpected internal error and
/// no input-derived plan is safe to build.
pub fn generic_fallback_plan() -> RecommendationPlan {
    RecommendationPlan {
        summary: "We could not prepare a personalised recommendation right now, so here is a \
                  balanced starting plan. Please try again later for a tailored one."
            .to_string(),
        workout_plan: general_workout(),
        nutrition_tips: general_nutrition(),
        notes: vec![],
    }
}

fn plan_from_measurements(measurements: &Measurements) -> RecommendationPlan {
    let bmi = measurements.bmi();

    let band = if bmi < 18.5 {
        "below the typical weight range"
    } else if bmi < 25.0 {
        "within the typical weight range"
    } else if bmi < 30.0 {
        "above the typical weight range"
    } else {
        "well above the typical weight range"
    };

    let summary = format!(
        "Your BMI is {:.1}, which is {}. A {} days/week routine focused on {} should suit you.",
        bmi,
        band,
        measurements.training_days,
        goal_phrase(measurements.goal),
    );

    let mut notes = Vec::new();
    if measurements.age >= 50 {
        notes.push(
            "Consider a check-up with your physician before starting a new training routine."
                .to_string(),
        );
    }
    if bmi >= 30.0 {
        notes.push(
            "Start with low-impact cardio (walking, cycling, swimming) to protect your joints."
                .to_string(),
        );
    }
    if bmi < 18.5 {
        notes.push("Pair training with a consistent calorie surplus to support weight gain.".to_string());
    }
    if measurements.equipment == Equipment::None {
        notes.push("All exercises below have bodyweight variants; no equipment is required.".to_string());
    }

    RecommendationPlan {
        summary,
        workout_plan: workout_for(measurements.goal, measurements.training_days),
        nutrition_tips: nutrition_for(measurements.goal),
        notes,
    }
}

fn photo_plan() -> RecommendationPlan {
    RecommendationPlan {
        summary: "Based on your photo we recommend a balanced full-body routine. Add your \
                  measurements for a more tailored plan."
            .to_string(),
        workout_plan: general_workout(),
        nutrition_tips: general_nutrition(),
        notes: vec!["Measurements (height, weight, age, goal) enable a personalised plan.".to_string()],
    }
}

fn goal_phrase(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::LoseWeight => "fat loss",
        FitnessGoal::BuildMuscle => "muscle growth",
        FitnessGoal::Endurance => "endurance",
        FitnessGoal::GeneralFitness => "overall fitness",
    }
}

fn workout_for(goal: FitnessGoal, training_days: u8) -> Vec<String> {
    let days = training_days.clamp(1, 6);

    let template: &[&str] = match goal {
        FitnessGoal::LoseWeight => &[
            "30-40 min steady-state cardio plus core work",
            "Full-body circuit: squats, push-ups, rows, planks (3 rounds)",
            "Interval session: 10 x 1 min hard / 1 min easy",
            "Brisk incline walk 45 min",
            "Full-body circuit with light weights (3 rounds)",
            "Active recovery: easy cycling or swimming 30 min",
        ],
        FitnessGoal::BuildMuscle => &[
            "Push day: bench press, overhead press, dips, triceps",
            "Pull day: deadlifts, rows, pull-ups, biceps",
            "Leg day: squats, lunges, leg press, calves",
            "Upper accessory: incline press, lateral raises, face pulls",
            "Lower accessory: Romanian deadlifts, hip thrusts, core",
            "Weak-point session plus 20 min easy cardio",
        ],
        FitnessGoal::Endurance => &[
            "Long easy run or ride, conversational pace",
            "Tempo session: 20 min comfortably hard",
            "Intervals: 6 x 3 min at threshold, 2 min recovery",
            "Cross-training: swim or row 40 min",
            "Hill repeats: 8 x 90 seconds",
            "Recovery jog 30 min plus mobility work",
        ],
        FitnessGoal::GeneralFitness => &[
            "Full-body strength: squat, press, row (3 x 8-10)",
            "30 min moderate cardio of your choice",
            "Full-body strength: hinge, pull, carry (3 x 8-10)",
            "Mobility and core: 30 min",
            "Mixed circuit: strength plus short cardio bursts",
            "Light activity: long walk or easy bike ride",
        ],
    };

    template
        .iter()
        .take(days as usize)
        .enumerate()
        .map(|(index, session)| format!("Day {}: {}", index + 1, session))
        .collect()
}

fn nutrition_for(goal: FitnessGoal) -> Vec<String> {
    match goal {
        FitnessGoal::LoseWeight => vec![
            "Aim for a moderate calorie deficit of 300-500 kcal/day.".to_string(),
            "Fill half your plate with vegetables at each meal.".to_string(),
            "Prefer water over sugary drinks.".to_string(),
        ],
        FitnessGoal::BuildMuscle => vec![
            "Eat 1.6-2.2 g of protein per kg of bodyweight daily.".to_string(),
            "Keep a small calorie surplus on training days.".to_string(),
            "Spread protein across 3-5 meals.".to_string(),
        ],
        FitnessGoal::Endurance => vec![
            "Prioritise carbohydrates around long sessions.".to_string(),
            "Rehydrate with electrolytes after sweaty workouts.".to_string(),
            "Do not skip protein: 1.4-1.6 g per kg supports recovery.".to_string(),
        ],
        FitnessGoal::GeneralFitness => general_nutrition(),
    }
}

fn general_workout() -> Vec<String> {
    vec![
        "Day 1: Full-body strength: squat, press, row (3 x 8-10)".to_string(),
        "Day 2: 30 min moderate cardio of your choice".to_string(),
        "Day 3: Full-body strength: hinge, pull, carry (3 x 8-10)".to_string(),
    ]
}

fn general_nutrition() -> Vec<String> {
    vec![
        "Build meals around a protein source, vegetables and whole grains.".to_string(),
        "Keep processed snacks for occasions, not routines.".to_string(),
        "Drink water through the day; thirst lags behind need.".to_string(),
    ]
}
