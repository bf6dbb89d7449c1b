use crate::harness::context::Context;
use crate::harness::error::Error;
use std::future::Future;
use tracing::info_span;
use tracing_futures::Instrument;

#[derive(Debug)]
pub struct EventHandler<EventFunction> {
    function: EventFunction,
}

impl<EventFunction> EventHandler<EventFunction> {
    pub fn init<EventRequest, EventResponse, HandlerError, Outatime>(
        function: EventFunction,
    ) -> EventHandler<EventFunction>
    where
        EventFunction: Fn(EventRequest, Context) -> Outatime,
        Outatime: Future<Output = Result<EventResponse, HandlerError>>,
        HandlerError: Into<Error>,
    {
        EventHandler { function }
    }

    pub async fn run<EventRequest, EventResponse, HandlerError, Outatime>(
        &self,
        event: EventRequest,
        context: Context,
    ) -> Result<EventResponse, Error>
    where
        EventFunction: Fn(EventRequest, Context) -> Outatime,
        Outatime: Future<Output = Result<EventResponse, HandlerError>>,
        HandlerError: Into<Error>,
    {
        let span = info_span!(
            "handler",
            function_name = context.function_name(),
            function_version = context.function_version(),
        );

        (self.function)(event, context)
            .instrument(span)
            .await
            .map_err(Into::into)
    }
}
