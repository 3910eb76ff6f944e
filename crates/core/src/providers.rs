//! Supported database providers and the names each one wires in

use crate::{
    binder::{Param, ParameterContext},
    impl_case_insensitive_enum,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseProvider {
    Postgres,
    SqlServer,
    Sqlite,
    CosmosDb,
}

impl_case_insensitive_enum!(
    DatabaseProvider,
    Postgres => "postgres",
    SqlServer => "sqlserver",
    Sqlite => "sqlite",
    CosmosDb => "cosmosdb"
);

/// Names and packages one provider contributes to the generated code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbContextProperties {
    pub db_name: &'static str,
    pub add_db_method: &'static str,
    pub db_type: &'static str,
    pub add_db_context_method: &'static str,
    pub db_context_name: &'static str,
    pub use_db_method: &'static str,
    /// Development connection string, `{0}` is the database name
    pub connection_string: &'static str,
    /// Hosting integration for the orchestration project
    pub app_host_package: &'static str,
    /// Client integration for the consuming project
    pub project_package: &'static str,
    /// Plain Entity Framework provider package
    pub ef_package: &'static str,
}

const POSTGRES: DbContextProperties = DbContextProperties {
    db_name: "postgresqldb",
    add_db_method: "AddPostgres",
    db_type: "postgres",
    add_db_context_method: "AddNpgsqlDbContext",
    db_context_name: "PostgreSqlDbContext",
    use_db_method: "UseNpgsql",
    connection_string: "server=localhost;username=postgres;database={0}",
    app_host_package: "Aspire.Hosting.PostgreSQL",
    project_package: "Aspire.Npgsql.EntityFrameworkCore.PostgreSQL",
    ef_package: "Npgsql.EntityFrameworkCore.PostgreSQL",
};

const SQL_SERVER: DbContextProperties = DbContextProperties {
    db_name: "sqldb",
    add_db_method: "AddSqlServer",
    db_type: "sqlserver",
    add_db_context_method: "AddSqlServerDbContext",
    db_context_name: "SqlServerDbContext",
    use_db_method: "UseSqlServer",
    connection_string: "Server=(localdb)\\mssqllocaldb;Database={0};Trusted_Connection=True;MultipleActiveResultSets=true",
    app_host_package: "Aspire.Hosting.SqlServer",
    project_package: "Aspire.Microsoft.EntityFrameworkCore.SqlServer",
    ef_package: "Microsoft.EntityFrameworkCore.SqlServer",
};

const SQLITE: DbContextProperties = DbContextProperties {
    db_name: "sqlitedb",
    add_db_method: "AddSqlite",
    db_type: "sqlite",
    add_db_context_method: "AddSqliteDbContext",
    db_context_name: "SqliteDbContext",
    use_db_method: "UseSqlite",
    connection_string: "Data Source={0}.db",
    app_host_package: "CommunityToolkit.Aspire.Hosting.SQLite",
    project_package: "CommunityToolkit.Aspire.Microsoft.EntityFrameworkCore.Sqlite",
    ef_package: "Microsoft.EntityFrameworkCore.Sqlite",
};

const COSMOS_DB: DbContextProperties = DbContextProperties {
    db_name: "cosmosdb",
    add_db_method: "AddAzureCosmosDB",
    db_type: "cosmos",
    add_db_context_method: "AddCosmosDbContext",
    db_context_name: "CosmosDbContext",
    use_db_method: "UseCosmos",
    connection_string: "AccountEndpoint=https://localhost:8081/;AccountKey=C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==",
    app_host_package: "Aspire.Hosting.Azure.CosmosDB",
    project_package: "Aspire.Microsoft.EntityFrameworkCore.Cosmos",
    ef_package: "Microsoft.EntityFrameworkCore.Cosmos",
};

impl DatabaseProvider {
    pub const ALL: [DatabaseProvider; 4] = [
        DatabaseProvider::Postgres,
        DatabaseProvider::SqlServer,
        DatabaseProvider::Sqlite,
        DatabaseProvider::CosmosDb,
    ];

    pub fn properties(&self) -> &'static DbContextProperties {
        match self {
            DatabaseProvider::Postgres => &POSTGRES,
            DatabaseProvider::SqlServer => &SQL_SERVER,
            DatabaseProvider::Sqlite => &SQLITE,
            DatabaseProvider::CosmosDb => &COSMOS_DB,
        }
    }

    /// `postgres, sqlserver, sqlite and cosmosdb`
    pub fn valid_options() -> String {
        match Self::NAMES.split_last() {
            Some((last, [])) => last.to_string(),
            Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
            None => String::new(),
        }
    }
}

impl DbContextProperties {
    /// Every provider-derived template value
    pub fn parameters(&self) -> ParameterContext {
        ParameterContext::new()
            .with(Param::DbName, self.db_name)
            .with(Param::AddDbMethod, self.add_db_method)
            .with(Param::DbType, self.db_type)
            .with(Param::AddDbContextMethod, self.add_db_context_method)
            .with(Param::DbContextName, self.db_context_name)
            .with(Param::UseDbMethod, self.use_db_method)
    }

    pub fn connection_string_for(&self, database: &str) -> String {
        self.connection_string.replace("{0}", database)
    }
}
