use std::time::Duration;

use gloo_timers::future::TimeoutFuture;

use crate::autoplay::Pacer;

pub(super) struct TimeoutPacer;

impl Pacer for TimeoutPacer {
    async fn pause(&self, duration: Duration) {
        let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(ms).await;
    }
}
