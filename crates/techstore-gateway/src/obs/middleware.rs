//! Request timing middleware.
//!
//! The timer starts before the router runs. The response body is wrapped so
//! that the "finished" hook fires once the body stream ends, errors, or is
//! dropped by the server, whichever comes first. The hook lives in an
//! `Option` that is taken on completion, so it runs exactly once per request.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use http_body::{Frame, SizeHint};
use pin_project_lite::pin_project;

use crate::app_state::AppState;

use super::http::HttpMetrics;

/// Route label for requests no route matched. Raw paths are never used as
/// labels, so stray 404s cannot grow the series maps.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Records the request once dropped.
struct FinishGuard {
    metrics: Arc<HttpMetrics>,
    route: String,
    method: String,
    status: u16,
    start: Instant,
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        self.metrics
            .observe_request(&self.route, &self.method, self.status, elapsed.as_secs_f64());
        tracing::debug!(
            route = %self.route,
            method = %self.method,
            status = self.status,
            elapsed_us = elapsed.as_micros() as u64,
            "request finished"
        );
    }
}

pin_project! {
    /// Response body that fires its guard when the stream completes.
    pub struct FinishBody<B> {
        #[pin]
        inner: B,
        guard: Option<FinishGuard>,
    }
}

impl<B> http_body::Body for FinishBody<B>
where
    B: http_body::Body,
{
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();
        let frame = ready!(this.inner.poll_frame(cx));
        if matches!(frame, None | Some(Err(_))) {
            drop(this.guard.take());
        }
        Poll::Ready(frame)
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

/// Count and time every request by (route, method, status).
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = match req.extensions().get::<MatchedPath>() {
        Some(p) => p.as_str().to_owned(),
        None => UNMATCHED_ROUTE.to_owned(),
    };
    let method = req.method().to_string();

    let res = next.run(req).await;

    let guard = FinishGuard {
        metrics: state.metrics(),
        route,
        method,
        status: res.status().as_u16(),
        start,
    };
    res.map(|body| {
        Body::new(FinishBody {
            inner: body,
            guard: Some(guard),
        })
    })
}
