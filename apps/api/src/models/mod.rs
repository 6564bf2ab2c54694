pub mod job_description;
pub mod resume;
pub mod score_card;
pub mod user;

pub use job_description::JobDescription;
pub use resume::{NewResume, Resume};
pub use score_card::ScoreCard;
pub use user::{NewUser, User};
