// Session-scoped state for one team page. Owned by the presentation layer,
// created empty when a team is opened and dropped when it navigates away.
pub mod notice;
pub mod summary;
pub mod team_session;

pub use notice::{Notice, NoticeLevel};
pub use summary::{ChartBars, ProgressSummary};
pub use team_session::TeamSession;
