use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::{info, instrument, warn};

mod context;
mod error;
mod handler;
mod settings;
mod truthiness;

pub use crate::harness::context::{
    empty_event, Context, Event, TEST_FUNCTION_NAME, TEST_FUNCTION_VERSION,
    TEST_INVOKED_FUNCTION_ARN,
};
pub use crate::harness::error::{Error, ErrorType, FailureReport, HarnessError};
pub use crate::harness::handler::EventHandler;
pub use crate::harness::settings::{
    Settings, DEFAULT_SERVICE, DEFAULT_STACK, DEFAULT_STAGE, SERVICE, STACK, STAGE,
};
pub use crate::harness::truthiness::{is_truthy, Truthy};

#[derive(Debug)]
pub struct Harness<'settings> {
    settings: &'settings Settings,
    context: Context,
    event: Event,
}

impl Harness<'static> {
    pub fn session() -> Harness<'static> {
        Harness::new(Settings::bootstrap())
    }
}

impl<'settings> Harness<'settings> {
    pub fn new(settings: &'settings Settings) -> Harness<'settings> {
        Harness {
            settings,
            context: Context::synthetic(),
            event: empty_event(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Harness<'settings> {
        self.context = context;
        self
    }

    pub fn with_event(mut self, event: Event) -> Harness<'settings> {
        self.event = event;
        self
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub async fn invoke<F, B, C, E, D>(&self, function: F) -> Result<Value, HarnessError>
    where
        B: DeserializeOwned,
        C: Serialize,
        E: Into<Error>,
        F: Fn(B, Context) -> D,
        D: Future<Output = Result<C, E>>,
    {
        let response = self.call(function).await?;

        serde_json::to_value(response)
            .map_err(HarnessError::Response)
            .map_err(report)
    }

    /// Runs the handler and fails unless its response is truthy. The response
    /// is judged as the handler returned it, before any JSON encoding.
    pub async fn invoke_and_assert<F, B, C, E, D>(&self, function: F) -> Result<C, HarnessError>
    where
        B: DeserializeOwned,
        C: Serialize,
        E: Into<Error>,
        F: Fn(B, Context) -> D,
        D: Future<Output = Result<C, E>>,
    {
        let response = self.call(function).await?;
        let truthy = truthiness::is_truthy(&response)
            .map_err(HarnessError::Response)
            .map_err(report)?;

        if truthy {
            info!("| harness assert | response is truthy");
            Ok(response)
        } else {
            let error = HarnessError::Falsy {
                function_name: self.context.function_name().to_string(),
                response: serde_json::to_value(&response).unwrap_or(Value::Null),
            };
            Err(report(error))
        }
    }

    #[instrument(
        skip(self, function),
        fields(
            function_name = self.context.function_name(),
            stage = self.settings.stage(),
        )
    )]
    async fn call<F, B, C, E, D>(&self, function: F) -> Result<C, HarnessError>
    where
        B: DeserializeOwned,
        C: Serialize,
        E: Into<Error>,
        F: Fn(B, Context) -> D,
        D: Future<Output = Result<C, E>>,
    {
        let event: B = serde_json::from_value(Value::Object(self.event.clone()))
            .map_err(HarnessError::Event)
            .map_err(report)?;

        let handler = EventHandler::init(function);
        let response = handler
            .run(event, self.context.clone())
            .await
            .map_err(|source| HarnessError::Handler {
                function_name: self.context.function_name().to_string(),
                source,
            })
            .map_err(report)?;

        info!("| harness invoke | handler returned");

        Ok(response)
    }
}

fn report(error: HarnessError) -> HarnessError {
    let report = serde_json::to_string(&error.report()).unwrap_or_else(|_| error.to_string());
    warn!("| harness invoke | {}", report);
    error
}

/// Invokes `function` with an empty event and the stub context under the
/// session settings, failing unless the response is truthy.
pub async fn invoke_and_assert<F, B, C, E, D>(function: F) -> Result<C, HarnessError>
where
    B: DeserializeOwned,
    C: Serialize,
    E: Into<Error>,
    F: Fn(B, Context) -> D,
    D: Future<Output = Result<C, E>>,
{
    Harness::session().invoke_and_assert(function).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    #[tokio::test]
    async fn invoke_and_assert_truthy() -> Result<(), HarnessError> {
        init_tracing();
        let response = invoke_and_assert(|_event: Value, _context: Context| async {
            Ok::<_, Error>(json!({ "statusCode": 200, "body": "hello" }))
        })
        .await?;
        assert_eq!(response, json!({ "statusCode": 200, "body": "hello" }));
        Ok(())
    }

    #[tokio::test]
    async fn invoke_and_assert_empty_mapping() {
        init_tracing();
        let result = invoke_and_assert(|_event: Value, _context: Context| async {
            Ok::<_, Error>(HashMap::<String, String>::new())
        })
        .await;
        match result {
            Err(HarnessError::Falsy {
                function_name,
                response,
            }) => {
                assert_eq!(function_name, String::from("testname"));
                assert_eq!(response, json!({}));
            }
            other => panic!("expected a falsy failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invoke_and_assert_none() {
        init_tracing();
        let result = invoke_and_assert(|_event: Value, _context: Context| async {
            Ok::<Option<String>, Error>(None)
        })
        .await;
        assert!(matches!(result, Err(HarnessError::Falsy { .. })));
    }

    #[tokio::test]
    async fn invoke_and_assert_false() {
        init_tracing();
        let result =
            invoke_and_assert(|_event: Value, _context: Context| async { Ok::<_, Error>(false) })
                .await;
        assert!(matches!(result, Err(HarnessError::Falsy { .. })));
    }

    #[tokio::test]
    async fn invoke_and_assert_handler_error() {
        init_tracing();
        let result = invoke_and_assert(|_event: Value, _context: Context| async {
            Err::<Value, _>(std::io::Error::new(
                std::io::ErrorKind::Other,
                "hello world is broken",
            ))
        })
        .await;
        match result {
            Err(HarnessError::Handler {
                function_name,
                source,
            }) => {
                assert_eq!(function_name, String::from("testname"));
                let io_error = source.downcast_ref::<std::io::Error>();
                assert_eq!(
                    io_error.map(|error| error.to_string()),
                    Some(String::from("hello world is broken")),
                );
            }
            other => panic!("expected the handler error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn handler_sees_stub_context_and_empty_event() -> Result<(), HarnessError> {
        let harness = Harness::session();
        let response = harness
            .invoke_and_assert(|event: Event, context: Context| async move {
                Ok::<_, Error>(json!({
                    "event_is_empty": event.is_empty(),
                    "context": context,
                }))
            })
            .await?;
        assert_eq!(
            response,
            json!({
                "event_is_empty": true,
                "context": {
                    "function_name": "testname",
                    "function_version": "testversion",
                    "invoked_function_arn": "test:arn",
                },
            }),
        );
        Ok(())
    }

    #[tokio::test]
    async fn invoke_with_overrides() -> Result<(), HarnessError> {
        #[derive(Deserialize)]
        struct Greeting {
            name: String,
        }

        let settings = Settings::new("billing", "prod-stack", "prod")?;
        let mut event = empty_event();
        event.insert(String::from("name"), json!("kaon"));
        let harness = Harness::new(&settings)
            .with_context(Context::create("greeter", "7", "arn:aws:lambda:greeter"))
            .with_event(event);
        assert_eq!(harness.settings().stage(), "prod");
        assert_eq!(harness.context().function_name(), "greeter");
        assert_eq!(harness.event().len(), 1);

        let response = harness
            .invoke(|greeting: Greeting, context: Context| async move {
                Ok::<_, Error>(format!(
                    "hello {} from {}",
                    greeting.name,
                    context.function_name()
                ))
            })
            .await?;
        assert_eq!(response, json!("hello kaon from greeter"));
        Ok(())
    }

    #[tokio::test]
    async fn invoke_does_not_assert() -> Result<(), HarnessError> {
        let response = Harness::session()
            .invoke(|_event: Value, _context: Context| async { Ok::<_, Error>(0) })
            .await?;
        assert_eq!(response, json!(0));
        Ok(())
    }

    #[tokio::test]
    async fn invoke_event_mismatch() {
        #[derive(Debug, Deserialize)]
        struct Required {
            #[allow(dead_code)]
            id: u64,
        }

        let result = Harness::session()
            .invoke(|_event: Required, _context: Context| async { Ok::<_, Error>(true) })
            .await;
        match result {
            Err(error @ HarnessError::Event(_)) => {
                assert_eq!(error.error_type(), ErrorType::Decode);
            }
            other => panic!("expected a decode failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn invoke_and_assert_non_finite() -> Result<(), HarnessError> {
        init_tracing();
        for test_float in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let response = invoke_and_assert(move |_event: Value, _context: Context| async move {
                Ok::<_, Error>(test_float)
            })
            .await?;
            assert_eq!(response.to_bits(), test_float.to_bits());
        }
        Ok(())
    }

    #[tokio::test]
    async fn invoke_and_assert_non_string_keys() -> Result<(), HarnessError> {
        init_tracing();
        let response = invoke_and_assert(|_event: Value, _context: Context| async {
            let mut grid = HashMap::new();
            grid.insert((1, 2), "hello");
            Ok::<_, Error>(grid)
        })
        .await?;
        assert_eq!(response.get(&(1, 2)), Some(&"hello"));
        Ok(())
    }
}
