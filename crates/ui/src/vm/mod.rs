mod practice_vm;
mod time_fmt;

pub use practice_vm::{
    ChoiceVm, FillCellVm, InputVm, ItemPillVm, PracticeVm, QuestionVm, RecentSessionVm,
    map_practice, map_recent_session,
};
pub use time_fmt::{MISSING, format_timestamp};
