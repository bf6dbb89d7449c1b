use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TEST_FUNCTION_NAME: &str = "testname";
pub const TEST_FUNCTION_VERSION: &str = "testversion";
pub const TEST_INVOKED_FUNCTION_ARN: &str = "test:arn";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Context {
    function_name: String,
    function_version: String,
    invoked_function_arn: String,
}

impl Context {
    pub fn create(
        function_name: impl Into<String>,
        function_version: impl Into<String>,
        invoked_function_arn: impl Into<String>,
    ) -> Context {
        Context {
            function_name: function_name.into(),
            function_version: function_version.into(),
            invoked_function_arn: invoked_function_arn.into(),
        }
    }

    pub fn synthetic() -> Context {
        Context::create(
            TEST_FUNCTION_NAME,
            TEST_FUNCTION_VERSION,
            TEST_INVOKED_FUNCTION_ARN,
        )
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn function_version(&self) -> &str {
        &self.function_version
    }

    pub fn invoked_function_arn(&self) -> &str {
        &self.invoked_function_arn
    }
}

pub type Event = Map<String, Value>;

pub fn empty_event() -> Event {
    Map::new()
}
