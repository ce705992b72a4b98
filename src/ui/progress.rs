use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// Spinner shown while a request is in flight.
///
/// Hidden when stderr is not a terminal, so piped output stays clean.
pub struct LoadingSpinner {
    bar: ProgressBar,
}

impl LoadingSpinner {
    pub fn start(message: &str) -> Self {
        let bar = if console::Term::stderr().is_term() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .expect("progress bar template is a valid static string");
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

/// Run `fut` with a "Loading..." spinner.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = LoadingSpinner::start(message);
    let out = fut.await;
    spinner.finish();
    out
}
