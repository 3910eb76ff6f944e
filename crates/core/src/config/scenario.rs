use super::model::EditConfig;
use crate::{error::Result, impl_case_insensitive_enum};
use tracing::debug;

const DB_APPHOST_JSON: &str = include_str!("../../resources/db-apphost.json");
const DB_WEBAPI_JSON: &str = include_str!("../../resources/db-webapi.json");
const EF_PROGRAM_JSON: &str = include_str!("../../resources/ef-program.json");

/// The edit sets bundled with the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Declare the database resource in the orchestration host and reference it
    DbAppHost,
    /// Register the database context in the consuming web project
    DbWebApi,
    /// Register a plain Entity Framework context with a connection string
    EfProgram,
}

impl_case_insensitive_enum!(
    Scenario,
    DbAppHost => "db-apphost",
    DbWebApi => "db-webapi",
    EfProgram => "ef-program"
);

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::DbAppHost, Scenario::DbWebApi, Scenario::EfProgram];

    fn resource(&self) -> &'static str {
        match self {
            Scenario::DbAppHost => DB_APPHOST_JSON,
            Scenario::DbWebApi => DB_WEBAPI_JSON,
            Scenario::EfProgram => EF_PROGRAM_JSON,
        }
    }
}

/// Every bundled config, parsed once at startup
#[derive(Debug, Clone)]
pub struct ConfigCatalog {
    app_host: EditConfig,
    web_api: EditConfig,
    ef_program: EditConfig,
}

impl ConfigCatalog {
    pub fn load() -> Result<Self> {
        let catalog = Self {
            app_host: EditConfig::from_json(Scenario::DbAppHost.resource())?,
            web_api: EditConfig::from_json(Scenario::DbWebApi.resource())?,
            ef_program: EditConfig::from_json(Scenario::EfProgram.resource())?,
        };
        debug!("Loaded {} bundled edit configs", Scenario::ALL.len());
        Ok(catalog)
    }

    pub fn get(&self, scenario: Scenario) -> &EditConfig {
        match scenario {
            Scenario::DbAppHost => &self.app_host,
            Scenario::DbWebApi => &self.web_api,
            Scenario::EfProgram => &self.ef_program,
        }
    }
}
