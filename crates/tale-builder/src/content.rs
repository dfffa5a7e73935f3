//! Subject-specific flavour text for generated scenes.
//!
//! Purely cosmetic: the tables pick location names and prose, never the
//! shape of the graph or its scoring.

use crate::options::Subject;

/// Flavour text for one subject.
#[derive(Debug, Clone, Copy)]
pub struct SubjectContent {
    /// Location names, cycled through the generated scenes.
    pub locations: &'static [&'static str],
    /// Display name of the mentor character.
    pub mentor: &'static str,
    /// Relationship key of the mentor character.
    pub mentor_key: &'static str,
    /// Item handed out at the start.
    pub starter_item: &'static str,
    /// Opening narration.
    pub opening: &'static str,
    /// Challenge narration.
    pub challenge: &'static str,
    /// Success ending narration.
    pub success: &'static str,
    /// Alternative ending narration.
    pub alternative: &'static str,
    /// Kind of multimedia resource typical for the subject.
    pub media_kind: &'static str,
}

const PHYSICS: SubjectContent = SubjectContent {
    locations: &[
        "Physics Laboratory",
        "Observatory Deck",
        "Particle Accelerator Hall",
        "Engineering Workshop",
    ],
    mentor: "Dr. Ada Volta",
    mentor_key: "dr_volta",
    starter_item: "lab_notebook",
    opening: "The hum of equipment fills the laboratory. Dr. Ada Volta looks up from a \
              tangle of wires and waves you over: an experiment has gone strangely wrong.",
    challenge: "The main apparatus sparks and stalls. Only a careful application of \
                everything you have learned will bring it back online.",
    success: "The apparatus springs to life. Dr. Volta grins: you reasoned like a physicist.",
    alternative: "The experiment stays a mystery for today, but your notebook is full of \
                  observations worth revisiting.",
    media_kind: "simulation",
};

const CHEMISTRY: SubjectContent = SubjectContent {
    locations: &[
        "Chemistry Lab",
        "Reagent Storeroom",
        "Fume Hood Station",
        "Crystal Cavern",
    ],
    mentor: "Professor Lena Curie",
    mentor_key: "prof_curie",
    starter_item: "safety_goggles",
    opening: "Flasks bubble in rainbow colours. Professor Lena Curie hands you a pair of \
              goggles: a mysterious compound needs identifying before the end of the day.",
    challenge: "The unknown compound reacts violently with everything on the bench. Time to \
                put your knowledge of reactions to the test.",
    success: "The compound is identified and neutralised. Professor Curie adds your name to \
              the lab's hall of fame.",
    alternative: "The compound keeps its secret for now, but you leave with a safer lab and \
                  a sharper eye.",
    media_kind: "video",
};

const BIOLOGY: SubjectContent = SubjectContent {
    locations: &[
        "Rainforest Research Station",
        "Microscopy Lab",
        "Tide Pool Shore",
        "Greenhouse",
    ],
    mentor: "Dr. Maya Linnaeus",
    mentor_key: "dr_linnaeus",
    starter_item: "field_guide",
    opening: "Birdsong drifts through the research station. Dr. Maya Linnaeus spreads out a \
              map: a species nobody can classify has been spotted nearby.",
    challenge: "The creature is finally in sight, and classifying it will take everything \
                you have observed so far.",
    success: "Your classification is confirmed. Dr. Linnaeus names the field notes after you.",
    alternative: "The creature slips back into the undergrowth, but your observations will \
                  guide the next expedition.",
    media_kind: "image",
};

const MATHEMATICS: SubjectContent = SubjectContent {
    locations: &[
        "Hall of Patterns",
        "Geometry Garden",
        "Number Tower",
        "Puzzle Vault",
    ],
    mentor: "Professor Leon Euler",
    mentor_key: "prof_euler",
    starter_item: "compass_and_ruler",
    opening: "Chalk dust glitters in the Hall of Patterns. Professor Leon Euler taps a sealed \
              door covered in symbols: it opens only for someone who can read them.",
    challenge: "The vault door presents its final puzzle, a problem that ties every idea \
                together.",
    success: "The vault swings open. Professor Euler applauds a proof well made.",
    alternative: "The vault stays closed today, but the patterns you found will not be \
                  forgotten.",
    media_kind: "interactive",
};

const GENERIC: SubjectContent = SubjectContent {
    locations: &[
        "Learning Center",
        "Library of Ideas",
        "Discovery Room",
        "Study Hall",
    ],
    mentor: "the Guide",
    mentor_key: "guide",
    starter_item: "journal",
    opening: "A quiet hall opens before you. The Guide smiles and hands you a journal: a \
              journey of discovery is about to begin.",
    challenge: "A final question stands between you and the end of the journey.",
    success: "You answer with confidence. The Guide nods: the journey has changed you.",
    alternative: "The journey ends on a different road, with plenty left to explore next time.",
    media_kind: "image",
};

impl SubjectContent {
    /// Content for `subject`, falling back to generic content.
    pub fn for_subject(subject: &Subject) -> &'static SubjectContent {
        match subject {
            Subject::Physics => &PHYSICS,
            Subject::Chemistry => &CHEMISTRY,
            Subject::Biology => &BIOLOGY,
            Subject::Mathematics => &MATHEMATICS,
            Subject::Other(_) => &GENERIC,
        }
    }

    /// Location for the `n`th generated scene.
    pub fn location(&self, n: usize) -> &'static str {
        self.locations[n % self.locations.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subjects_have_own_content() {
        let physics = SubjectContent::for_subject(&Subject::Physics);
        assert_eq!(physics.location(0), "Physics Laboratory");
        let biology = SubjectContent::for_subject(&Subject::Biology);
        assert_eq!(biology.mentor_key, "dr_linnaeus");
    }

    #[test]
    fn unknown_subject_falls_back() {
        let content = SubjectContent::for_subject(&Subject::Other("history".into()));
        assert_eq!(content.mentor_key, "guide");
    }

    #[test]
    fn locations_cycle() {
        let content = SubjectContent::for_subject(&Subject::Mathematics);
        assert_eq!(content.location(4), content.location(0));
    }
}
