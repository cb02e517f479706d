use crate::io::{BlockInput, Report, ReportSink, StereoBlock};

/// Lowest counter value.
pub const MONITOR_COUNT_MIN: i32 = 0;
/// Highest counter value.
pub const MONITOR_COUNT_MAX: i32 = 10;

/// Serial-monitor demo: echoes keys and button presses as reports and keeps
/// a small saturating counter. Both outputs stay silent.
#[derive(Debug, Default)]
pub struct Monitor {
    count: i32,
}

impl Monitor {
    pub fn new() -> Self {
        Self {
            count: MONITOR_COUNT_MIN,
        }
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn process(
        &mut self,
        input: &BlockInput<'_>,
        out: &mut StereoBlock,
        reports: &mut dyn ReportSink,
    ) {
        if input.button {
            reports.report(Report::ButtonPressed);
        }

        if let Some(key) = input.key {
            match key {
                'n' | 'f' | 'r' | 'b' => reports.report(Report::KeyPressed(key)),
                '+' => {
                    self.count = (self.count + 1).min(MONITOR_COUNT_MAX);
                    reports.report(Report::Counter(self.count));
                }
                '-' => {
                    self.count = (self.count - 1).max(MONITOR_COUNT_MIN);
                    reports.report(Report::Counter(self.count));
                }
                _ => reports.report(Report::InvalidKey(key)),
            }
        }

        out.fill_silence();
    }
}
