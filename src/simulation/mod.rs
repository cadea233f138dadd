pub mod states;
pub mod params;
pub mod engine;
pub mod body;
pub mod forces;
pub mod seeding;
pub mod integrator;
pub mod scenario;
