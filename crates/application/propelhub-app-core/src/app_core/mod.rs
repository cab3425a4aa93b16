pub mod actions;
pub mod reducer;
pub mod store;

pub use actions::{clear_phase, fetch_repos, get_builds, git_commit, Action, ActionType, Workflow};
pub use reducer::reduce;
pub use store::AppStore;
