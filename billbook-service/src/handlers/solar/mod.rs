pub mod dashboard;
pub mod documents;
pub mod materials;
pub mod milestones;
pub mod projects;
pub mod subsidies;
