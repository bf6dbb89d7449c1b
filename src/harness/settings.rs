use crate::harness::error::HarnessError;
use std::sync::OnceLock;
use tracing::{info, instrument};

pub const SERVICE: &str = "SERVICE";
pub const STACK: &str = "STACK";
pub const STAGE: &str = "STAGE";

pub const DEFAULT_SERVICE: &str = "aws-cd-pipeline";
pub const DEFAULT_STACK: &str = "localstack";
pub const DEFAULT_STAGE: &str = "localtest";

static SESSION: OnceLock<Settings> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    service: String,
    stack: String,
    stage: String,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            service: String::from(DEFAULT_SERVICE),
            stack: String::from(DEFAULT_STACK),
            stage: String::from(DEFAULT_STAGE),
        }
    }
}

impl Settings {
    pub fn new(
        service: impl Into<String>,
        stack: impl Into<String>,
        stage: impl Into<String>,
    ) -> Result<Settings, HarnessError> {
        let settings = Settings {
            service: service.into(),
            stack: stack.into(),
            stage: stage.into(),
        };

        for (name, value) in settings.vars() {
            validate(name, value)?;
        }

        Ok(settings)
    }

    /// Exports the default settings once per process and hands out the same
    /// instance on every later call.
    pub fn bootstrap() -> &'static Settings {
        SESSION.get_or_init(|| {
            let settings = Settings::default();
            settings.export();
            info!("| harness bootstrap | session settings exported");
            settings
        })
    }

    #[instrument]
    pub fn from_env() -> Result<Settings, HarnessError> {
        Settings::new(read(SERVICE)?, read(STACK)?, read(STAGE)?)
    }

    pub fn export(&self) {
        for (name, value) in self.vars() {
            std::env::set_var(name, value);
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn vars(&self) -> [(&'static str, &str); 3] {
        [
            (SERVICE, self.service.as_str()),
            (STACK, self.stack.as_str()),
            (STAGE, self.stage.as_str()),
        ]
    }
}

fn validate(name: &'static str, value: &str) -> Result<(), HarnessError> {
    let reason = if value.is_empty() {
        "value is empty"
    } else if value.contains('=') {
        "value contains '='"
    } else if value.contains('\0') {
        "value contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(HarnessError::Setting {
        name,
        reason: String::from(reason),
    })
}

fn read(name: &'static str) -> Result<String, HarnessError> {
    std::env::var(name).map_err(|_| HarnessError::MissingVariable(name))
}
