use metrics::{describe_histogram, histogram};
use std::future::Future;
use tokio::time::Instant;

use once_cell::sync::OnceCell;

const METRIC_SUFFIX: &str = "task_duration_ms";

static METRIC_NAME: OnceCell<String> = OnceCell::new();

/// Names and describes the task duration histogram after the running service.
pub fn init(service_name: &str) {
    let metric_name = METRIC_NAME.get_or_init(|| format!("{service_name}_{METRIC_SUFFIX}"));
    describe_histogram!(metric_name.as_str(), "Task execution duration in milliseconds.");
}

fn metric_name() -> &'static str {
    METRIC_NAME.get().map(String::as_str).unwrap_or(METRIC_SUFFIX)
}

/// Records how long a future takes to complete.
#[crate::async_trait]
pub trait Timeable<T> {
    async fn time_as<S: Into<String> + Send>(self, task_name: S) -> T;
}

#[crate::async_trait]
impl<Fut, Res> Timeable<Res> for Fut
where
    Fut: Future<Output = Res> + Send,
{
    async fn time_as<S: Into<String> + Send>(self, task_name: S) -> Res {
        let start = Instant::now();
        let result = self.await;
        let duration = start.elapsed();
        let task: String = task_name.into();

        histogram!(metric_name(), duration.as_secs_f64() * 1000.0, "task" => task);

        result
    }
}
