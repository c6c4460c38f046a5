mod month_period;
mod month_report;

pub use month_period::{InvalidMonth, MonthPeriod};
pub use month_report::{MonthReport, month_report, recent_first};
