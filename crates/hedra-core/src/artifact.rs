//! Study artifact kinds and their generation prompts.

use anyhow::bail;

/// What the pipeline asks the model to produce from a lecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Transcript,
    Summary,
    Quiz,
    Flashcards,
    StudyPlan,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Transcript,
        ArtifactKind::Summary,
        ArtifactKind::Quiz,
        ArtifactKind::Flashcards,
        ArtifactKind::StudyPlan,
    ];

    /// Stable string form, used in the database and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Transcript => "transcript",
            ArtifactKind::Summary => "summary",
            ArtifactKind::Quiz => "quiz",
            ArtifactKind::Flashcards => "flashcards",
            ArtifactKind::StudyPlan => "study-plan",
        }
    }

    /// Instruction sent alongside the lecture media.
    pub fn prompt(self) -> &'static str {
        match self {
            ArtifactKind::Transcript => {
                "Transcribe the attached lecture verbatim. Keep speaker changes \
                 and section headings where they are apparent."
            }
            ArtifactKind::Summary => {
                "Summarize the attached lecture for a student. Use short sections \
                 with headings, and end with the three most important takeaways."
            }
            ArtifactKind::Quiz => {
                "Write a 10-question quiz covering the attached lecture. Mix \
                 multiple-choice and short-answer questions, and put the answer \
                 key at the end."
            }
            ArtifactKind::Flashcards => {
                "Create flashcards from the attached lecture, one per key concept. \
                 Format each as 'Q:' and 'A:' lines separated by blank lines."
            }
            ArtifactKind::StudyPlan => {
                "Build a one-week study plan for mastering the attached lecture. \
                 Break it into daily sessions with concrete goals and a short \
                 self-check per day."
            }
        }
    }
}

impl std::str::FromStr for ArtifactKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transcript" => Ok(ArtifactKind::Transcript),
            "summary" => Ok(ArtifactKind::Summary),
            "quiz" => Ok(ArtifactKind::Quiz),
            "flashcards" => Ok(ArtifactKind::Flashcards),
            "study-plan" => Ok(ArtifactKind::StudyPlan),
            other => bail!(
                "unknown artifact kind '{other}' (expected one of: transcript, summary, quiz, flashcards, study-plan)"
            ),
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
