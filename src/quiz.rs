// src/quiz.rs
//
// Manual checklist scorer: 13 fixed yes/no questions with fixed weights,
// iterated once. Kept fully independent of the image-based pipeline; the two
// scores are presented side by side, never combined.

/// Fixed question/weight table, in presentation order.
/// Structural, material, environmental, mechanical, then maintenance.
pub const QUESTIONS: [(&str, u32); 13] = [
    ("Broken or missing bolts/screws?", 10),
    ("Cracks in slides/climbers?", 10),
    ("Leaning or unstable equipment?", 10),
    ("Rust or corrosion?", 8),
    ("Wood splinters?", 5),
    ("Worn-out plastic/rubber parts?", 7),
    ("Slippery surfaces?", 8),
    ("Rocks, glass, or trash?", 7),
    ("Puddles or poor drainage?", 5),
    ("Creaky/loose swings or hinges?", 6),
    ("Exposed springs or moving parts?", 6),
    ("Overgrown plants or weeds?", 3),
    ("Graffiti/vandalism affecting safety?", 5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    No,
    Yes,
}

/// Score the checklist: 100 minus the weight of every "Yes" answer.
/// Clamped to [0, 100] so the bound holds even if the weights change.
pub fn score_answers(answers: &[Answer; QUESTIONS.len()]) -> u32 {
    let penalty: u32 = QUESTIONS
        .iter()
        .zip(answers.iter())
        .filter(|(_, answer)| **answer == Answer::Yes)
        .map(|((_, weight), _)| weight)
        .sum();

    100i64.saturating_sub(penalty as i64).clamp(0, 100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_no_scores_full() {
        assert_eq!(score_answers(&[Answer::No; 13]), 100);
    }

    #[test]
    fn test_all_yes_hits_weight_floor() {
        // Total weight is 90, so the worst checklist score is 10.
        assert_eq!(score_answers(&[Answer::Yes; 13]), 10);
    }

    #[test]
    fn test_structural_hazards_weigh_heaviest() {
        let mut answers = [Answer::No; 13];
        answers[0] = Answer::Yes;
        answers[1] = Answer::Yes;
        answers[2] = Answer::Yes;
        assert_eq!(score_answers(&answers), 70);
    }

    #[test]
    fn test_single_answer_matches_its_weight() {
        for (i, (_, weight)) in QUESTIONS.iter().enumerate() {
            let mut answers = [Answer::No; 13];
            answers[i] = Answer::Yes;
            assert_eq!(score_answers(&answers), 100 - weight);
        }
    }

    #[test]
    fn test_weight_table_total() {
        let total: u32 = QUESTIONS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 90);
    }
}
