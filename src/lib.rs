// Quiz engine, topic loading and rendering for kaiwa.
// main.rs only wires these modules to the terminal.
pub mod app_dirs;
pub mod config;
pub mod controls;
pub mod countdown;
pub mod distractor;
pub mod error;
pub mod quiz;
pub mod runtime;
pub mod sampler;
pub mod score;
pub mod session;
pub mod topic;
pub mod ui;

pub use error::QuizError;
pub use quiz::{QuizSession, QuizState};
pub use session::{QuizSettings, SessionView};
pub use topic::{QuestionRecord, Topic, TopicCatalog};
