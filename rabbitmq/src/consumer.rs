use crate::otel;
use lapin::protocol::basic::AMQPProperties;
use messaging::handler::ConsumerHandler;
use opentelemetry::{
    global::BoxedTracer,
    trace::{FutureExt, Status, TraceContextExt},
    Context,
};
use std::{borrow::Cow, sync::Arc};
use tracing::{debug, error};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DispatchReport {
    pub(crate) succeeded: usize,
    pub(crate) failed: usize,
}

pub(crate) async fn consume(
    tracer: &BoxedTracer,
    queue: &str,
    handlers: &[Arc<dyn ConsumerHandler>],
    props: &AMQPProperties,
    data: &[u8],
) {
    let ctx = otel::new_span(props, tracer, queue);

    debug!(
        trace.id = otel::trace_id(&ctx),
        span.id = otel::span_id(&ctx),
        "received: {} bytes - queue: {}",
        data.len(),
        queue,
    );

    let report = dispatch(&ctx, queue, handlers, data).await;
    ctx.span().end();

    debug!(
        succeeded = report.succeeded,
        failed = report.failed,
        "delivery dispatched - queue: {}",
        queue,
    );
}

/// Runs every handler, in order, against the same body. A failing handler is
/// logged and recorded on the span; it never prevents the next one from running.
pub(crate) async fn dispatch(
    ctx: &Context,
    queue: &str,
    handlers: &[Arc<dyn ConsumerHandler>],
    data: &[u8],
) -> DispatchReport {
    let mut report = DispatchReport::default();

    if handlers.is_empty() {
        debug!(queue = queue, "no handler registered, message dropped");
        return report;
    }

    for (position, handler) in handlers.iter().enumerate() {
        match handler.exec(ctx, data).with_context(ctx.clone()).await {
            Ok(_) => report.succeeded += 1,
            Err(err) => {
                error!(
                    trace.id = otel::trace_id(ctx),
                    span.id = otel::span_id(ctx),
                    error = err.to_string(),
                    handler = position,
                    "handler failure - queue: {}",
                    queue,
                );
                ctx.span().record_error(&err);
                report.failed += 1;
            }
        }
    }

    if report.failed > 0 {
        ctx.span().set_status(Status::Error {
            description: Cow::from(format!(
                "{} of {} handlers failed",
                report.failed,
                handlers.len()
            )),
        });
    } else {
        debug!(
            trace.id = otel::trace_id(ctx),
            span.id = otel::span_id(ctx),
            "message successfully processed"
        );
        ctx.span().set_status(Status::Ok);
    }

    report
}
