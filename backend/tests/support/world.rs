//! Per-test database context shared by the persistence suites.

use std::future::Future;

use pg_embedded_setup_unpriv::TemporaryDatabase;
use rollcall::domain::ports::DirectoryRepository;
use rollcall::domain::{
    Device, Location, LocationName, Login, MacAddress, Role, RoleName, UserDraft, UserProfile,
};
use rollcall::outbound::persistence::{
    DbPool, DieselActivityRepository, DieselDirectoryRepository, DieselShiftRepository,
    PoolConfig,
};
use tokio::runtime::Runtime;

use super::pg_embed::shared_cluster;
use super::provision_template_database;

/// A freshly cloned database with every adapter wired to it.
pub struct TestWorld {
    runtime: Runtime,
    pub pool: DbPool,
    pub directory: DieselDirectoryRepository,
    pub shifts: DieselShiftRepository,
    pub activities: DieselActivityRepository,
    pub database_url: String,
    _database: TemporaryDatabase,
}

impl TestWorld {
    /// Provision a database and open a small pool against it.
    pub fn setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster()?;
        let database = provision_template_database(cluster)?;
        let database_url = database.url().to_string();

        let config = PoolConfig::new(&database_url)
            .with_max_size(4)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            directory: DieselDirectoryRepository::new(pool.clone()),
            shifts: DieselShiftRepository::new(pool.clone()),
            activities: DieselActivityRepository::new(pool.clone()),
            pool,
            database_url,
            _database: database,
        })
    }

    /// Drive `future` to completion on the world's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        assert!(
            tokio::runtime::Handle::try_current().is_err(),
            "do not call block_on from inside a Tokio runtime"
        );
        self.runtime.block_on(future)
    }

    /// Register a member with no card or wallet.
    pub fn user(&self, login: &str) -> UserProfile {
        let draft = UserDraft::new(Login::new(login).expect("valid login"));
        self.block_on(self.directory.create_user(&draft))
            .expect("user is created")
    }

    /// Register a reader with a fresh role and location.
    pub fn device(&self, mac: &str, role: &str, location: &str) -> Device {
        let role: Role = self
            .block_on(self.directory.create_role(&RoleName::new(role).expect("valid role")))
            .expect("role is created");
        let location: Location = self
            .block_on(
                self.directory
                    .create_location(&LocationName::new(location).expect("valid location")),
            )
            .expect("location is created");
        let mac = MacAddress::new(mac).expect("valid mac");
        let id = self
            .block_on(self.directory.create_device(&mac, role.id, location.id))
            .expect("device is created");
        Device {
            id,
            mac,
            role,
            location,
        }
    }
}
