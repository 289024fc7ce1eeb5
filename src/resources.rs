use serde::Serialize;

use crate::{
    error::{Error, Result},
    models::Phase,
    store::{keys, Store},
};

#[derive(Debug, Serialize)]
pub struct PhaseResources {
    pub phase: Phase,
    pub label: &'static str,
    pub tip: &'static str,
    pub nutrition: &'static [&'static str],
    pub exercise: &'static [&'static str],
    pub wellness: &'static [&'static str],
}

pub fn for_phase(phase: Phase) -> PhaseResources {
    let (tip, nutrition, exercise, wellness): (&str, &[&str], &[&str], &[&str]) = match phase {
        Phase::Menstrual => (
            "🩸 Rest, reflect & journal. Plan low-energy tasks.",
            &[
                "Iron-rich foods (leafy greens, red meat)",
                "Complex carbohydrates",
                "Anti-inflammatory foods",
                "Warm, nourishing soups",
                "Dark chocolate (70%+ cocoa)",
            ],
            &["Gentle yoga", "Light walking", "Stretching", "Meditation", "Rest days as needed"],
            &["Heat therapy", "Extra rest", "Journaling", "Meditation", "Salt baths"],
        ),
        Phase::Follicular => (
            "🌱 Start new projects. Brainstorm. Energy is rising!",
            &[
                "Lean proteins",
                "Fresh fruits and vegetables",
                "Fermented foods",
                "Seeds (flax, pumpkin)",
                "Light, energizing meals",
            ],
            &[
                "Cardio workouts",
                "Dance classes",
                "Strength training",
                "New fitness classes",
                "High-energy activities",
            ],
            &[
                "Goal setting",
                "Creative projects",
                "Learning new skills",
                "Social activities",
                "Adventure planning",
            ],
        ),
        Phase::Ovulatory => (
            "🔥 High-energy zone! Schedule meetings, pitch, lead!",
            &[
                "Raw vegetables",
                "Antioxidant-rich foods",
                "Healthy fats",
                "Hydrating foods",
                "Light, fresh meals",
            ],
            &[
                "High-intensity workouts",
                "Group fitness classes",
                "Sports activities",
                "Running",
                "Power yoga",
            ],
            &[
                "Networking",
                "Public speaking",
                "Dating",
                "Social events",
                "Leadership activities",
            ],
        ),
        Phase::Luteal => (
            "🌙 Slow down. Wrap things up, organize, declutter.",
            &[
                "Magnesium-rich foods",
                "Complex carbohydrates",
                "Calcium-rich foods",
                "Healthy fats",
                "Comfort foods in moderation",
            ],
            &["Strength training", "Pilates", "Swimming", "Moderate cardio", "Yoga flow"],
            &[
                "Organization tasks",
                "Self-care routines",
                "Meal prep",
                "Relaxation techniques",
                "Gentle movement",
            ],
        ),
    };

    PhaseResources {
        phase,
        label: phase.label(),
        tip,
        nutrition,
        exercise,
        wellness,
    }
}

/// Every phase, or only the one named by `phase`.
pub fn list(phase: Option<&str>) -> Result<Vec<PhaseResources>> {
    match phase.map(str::trim).filter(|p| !p.is_empty()) {
        None => Ok(Phase::ALL.into_iter().map(for_phase).collect()),
        Some(name) => {
            let phase: Phase = name
                .parse()
                .map_err(|_| Error::not_found("No resources found for this phase."))?;
            Ok(vec![for_phase(phase)])
        }
    }
}

/// Resources for the phase derived by the last completed quiz.
pub async fn current(store: &Store) -> Result<PhaseResources> {
    let phase = store
        .load::<Phase>(keys::CURRENT_CYCLE_PHASE)
        .await?
        .ok_or_else(|| Error::not_found("No current phase yet. Complete the quiz first."))?;
    Ok(for_phase(phase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_all_phases_without_filter() {
        let all = list(None).unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|r| r.nutrition.len() == 5 && r.exercise.len() == 5));
    }

    #[test]
    fn filters_by_phase_name() {
        let only = list(Some("ovulation")).unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].phase, Phase::Ovulatory);
        assert!(only[0].exercise.contains(&"Power yoga"));
    }

    #[test]
    fn blank_filter_lists_everything() {
        assert_eq!(list(Some("  ")).unwrap().len(), 4);
    }

    #[test]
    fn unknown_phase_is_not_found() {
        assert!(matches!(list(Some("spring")), Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn current_uses_stored_phase() {
        let store = Store::in_memory();
        assert!(current(&store).await.is_err());

        store.save(keys::CURRENT_CYCLE_PHASE, &Phase::Luteal).await.unwrap();
        let res = current(&store).await.unwrap();
        assert_eq!(res.label, "Luteal Phase");
    }
}
