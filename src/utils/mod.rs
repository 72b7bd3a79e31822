use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const ONLY_MESSAGE_TEMPLATE: &str = "{spinner} {wide_msg}";

pub trait MultiProgressNew {
    fn add_spinner(&self) -> ProgressBar;
}

impl MultiProgressNew for MultiProgress {
    fn add_spinner(&self) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyle::with_template(ONLY_MESSAGE_TEMPLATE).unwrap());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
