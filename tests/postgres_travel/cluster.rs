//! Embedded `PostgreSQL` cluster shared by the integration tests.
//!
//! The cluster is bootstrapped once per test binary. Unprivileged runs start
//! it in process; root runs delegate to the worker binary named by
//! `PG_EMBEDDED_WORKER` (or a `pg_worker` found on `PATH`), which drops
//! privileges before touching the data directory.

use crate::test_helpers::EnvVarGuard;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{
    ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests, detect_execution_privileges,
};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use std::ffi::OsString;
use std::net::TcpListener;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared cluster handle.
pub type PostgresCluster = &'static ManagedCluster;

static SHARED_CLUSTER: OnceLock<ManagedCluster> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Embedded cluster plus the runtime that drives it in process.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    // Keeps an in-process server and its runtime alive for the whole run.
    _in_process: Option<(Runtime, PostgreSQL)>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let bootstrap_env = bootstrap_env_changes()?;
        let env_guard = EnvVarGuard::set_many(&bootstrap_env);
        let bootstrapped = bootstrap_for_tests();
        drop(env_guard);
        let mut bootstrap = bootstrapped.map_err(|err| Box::new(err) as BoxError)?;
        sync_password_from_file(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let in_process = match bootstrap.privileges {
            ExecutionPrivileges::Root => {
                start_via_worker(&mut bootstrap, &env_vars)?;
                None
            }
            ExecutionPrivileges::Unprivileged => {
                Some(start_in_process(&mut bootstrap, &env_vars)?)
            }
        };
        Ok(Self {
            bootstrap,
            _in_process: in_process,
        })
    }

    /// Returns the connection URL of `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates `template` and runs `migrate` against its URL unless it
    /// already exists. A failed migration drops the half-built template.
    pub fn ensure_template<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = template_lock();
        if self.database_exists(template)? {
            return Ok(());
        }
        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(&self.database_url(template)) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Creates `database` as a copy of `template`.
    pub fn create_database_from_template(
        &self,
        database: &str,
        template: &str,
    ) -> Result<(), BoxError> {
        // Postgres refuses to copy a template another session is using.
        let _guard = template_lock();
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(database),
            quote_identifier(template),
        ))
    }

    /// Drops `database`, closing any connection still open on it.
    pub fn drop_database(&self, database: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(database)
        ))
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut connection = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut connection)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, database: &str) -> Result<bool, BoxError> {
        #[derive(QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut connection = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(database)
        .get_result::<ExistsRow>(&mut connection)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

/// Returns the shared cluster, starting it on first use.
///
/// Blocks while the cluster starts; call it from `spawn_blocking` inside
/// async tests.
///
/// # Panics
///
/// Panics when the cluster cannot be started, so database tests fail
/// instead of passing without a database.
pub fn shared_cluster() -> PostgresCluster {
    SHARED_CLUSTER.get_or_init(|| match ManagedCluster::new() {
        Ok(cluster) => cluster,
        Err(err) => panic!("failed to start embedded PostgreSQL: {err}"),
    })
}

fn start_in_process(
    bootstrap: &mut TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
) -> Result<(Runtime, PostgreSQL), BoxError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)?;
    let env_guard = EnvVarGuard::set_many(&env_vars_to_os(env_vars));
    let mut postgres = PostgreSQL::new(bootstrap.settings.clone());
    let started = runtime.block_on(async {
        postgres
            .setup()
            .await
            .map_err(|err| Box::new(err) as BoxError)?;
        if !matches!(postgres.status(), Status::Started) {
            postgres
                .start()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
        }
        Ok::<(), BoxError>(())
    });
    drop(env_guard);
    started?;
    bootstrap.settings = postgres.settings().clone();
    sync_port_from_pid(&mut bootstrap.settings)?;
    Ok((runtime, postgres))
}

fn start_via_worker(
    bootstrap: &mut TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
) -> Result<(), BoxError> {
    run_worker_operation(bootstrap, env_vars, WorkerOperation::Setup, bootstrap.setup_timeout)?;
    run_worker_operation(bootstrap, env_vars, WorkerOperation::Start, bootstrap.start_timeout)?;
    sync_port_from_pid(&mut bootstrap.settings)
}

fn run_worker_operation(
    bootstrap: &TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
    operation: WorkerOperation,
    timeout: Duration,
) -> Result<(), BoxError> {
    let worker = bootstrap.worker_binary.as_ref().ok_or_else(|| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "running as root needs PG_EMBEDDED_WORKER or a pg_worker binary on PATH",
        )) as BoxError
    })?;
    let worker_env = env_vars.to_vec();
    let args = WorkerRequestArgs {
        worker: worker.as_path(),
        settings: &bootstrap.settings,
        env_vars: &worker_env,
        operation,
        timeout,
    };
    run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)
}

fn template_lock() -> std::sync::MutexGuard<'static, ()> {
    TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn env_vars_to_os(env_vars: &[(String, Option<String>)]) -> Vec<(OsString, Option<OsString>)> {
    env_vars
        .iter()
        .map(|(key, value)| (OsString::from(key), value.as_ref().map(OsString::from)))
        .collect()
}

/// Picks a free port unless `PG_PORT` is set, and points root runs at a
/// `pg_worker` on `PATH` when `PG_EMBEDDED_WORKER` is unset.
fn bootstrap_env_changes() -> Result<Vec<(OsString, Option<OsString>)>, BoxError> {
    let mut changes = Vec::new();
    if std::env::var_os("PG_PORT").is_none() {
        let listener =
            TcpListener::bind(("127.0.0.1", 0)).map_err(|err| Box::new(err) as BoxError)?;
        let port = listener
            .local_addr()
            .map_err(|err| Box::new(err) as BoxError)?
            .port();
        changes.push((OsString::from("PG_PORT"), Some(OsString::from(port.to_string()))));
    }
    let needs_worker = matches!(detect_execution_privileges(), ExecutionPrivileges::Root)
        && std::env::var_os("PG_EMBEDDED_WORKER").is_none();
    if let Some(worker) = needs_worker.then(worker_on_path).flatten() {
        changes.push((OsString::from("PG_EMBEDDED_WORKER"), Some(worker)));
    }
    Ok(changes)
}

fn worker_on_path() -> Option<OsString> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join("pg_worker"))
        .find(|candidate| candidate.is_file())
        .map(std::path::PathBuf::into_os_string)
}

fn open_dir(path: &Utf8Path) -> Result<Dir, BoxError> {
    Dir::open_ambient_dir(path, ambient_authority()).map_err(|err| Box::new(err) as BoxError)
}

fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let password_file = settings.password_file.to_string_lossy().into_owned();
    let password_path = Utf8Path::new(&password_file);
    let (Some(parent), Some(file_name)) = (password_path.parent(), password_path.file_name())
    else {
        return Ok(());
    };
    match open_dir(parent)?.read_to_string(file_name) {
        Ok(contents) => {
            let password = contents.trim_end();
            if !password.is_empty() {
                password.clone_into(&mut settings.password);
            }
            Ok(())
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(Box::new(err) as BoxError),
    }
}

/// The fourth line of `postmaster.pid` holds the port the server bound.
fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let data_dir = settings.data_dir.to_string_lossy().into_owned();
    let contents = match open_dir(Utf8Path::new(&data_dir))?.read_to_string("postmaster.pid") {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(Box::new(err) as BoxError),
    };
    if let Some(port) = contents
        .lines()
        .nth(3)
        .and_then(|line| line.trim().parse::<u16>().ok())
    {
        settings.port = port;
    }
    Ok(())
}
