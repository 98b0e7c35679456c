pub mod policy;
pub mod quality;
pub mod repetition;
pub mod skill;

pub use policy::{Branch, Choice, DifficultyPolicy, PolicyContext, ScoredMove, SelectedMove};
pub use quality::{assess_automated, assess_human, Assessment, MoveQuality};
pub use repetition::RepetitionTracker;
pub use skill::SkillState;
