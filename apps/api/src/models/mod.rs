pub mod candidate;

pub use candidate::{
    CandidateRecord, CandidateSummary, EducationEntry, ExperienceEntry, ProjectEntry,
};
