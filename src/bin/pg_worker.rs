//! Runs embedded `PostgreSQL` lifecycle steps for the integration test cluster.
//!
//! Usage:
//!
//! ```text
//! pg_worker <setup|start|stop> <payload-path>
//! ```
//!
//! `pg-embed-setup-unpriv` launches this binary when the test suite runs as
//! root. The payload is the JSON `WorkerPayload` it writes: cluster settings
//! plus environment overrides. `PostgreSQL` refuses to run as root, so after
//! reading the payload the worker switches to the `nobody` account.

#[cfg(unix)]
mod worker {
    use camino::{Utf8Path, Utf8PathBuf};
    use nix::unistd::{Uid, User, initgroups, setgid, setuid};
    use pg_embedded_setup_unpriv::ambient_dir_and_path;
    use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
    use postgresql_embedded::{PostgreSQL, Status};
    use std::env;
    use std::ffi::CString;
    use std::fmt::Display;
    use std::io::Read;
    use thiserror::Error;
    use tokio::runtime::Builder;

    type BoxError = Box<dyn std::error::Error + Send + Sync>;

    const UNPRIVILEGED_USER: &str = "nobody";

    /// Lifecycle step requested by the cluster bootstrap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Operation {
        Setup,
        Start,
        Stop,
    }

    impl Operation {
        fn parse(raw: &str) -> Result<Self, WorkerError> {
            match raw {
                "setup" => Ok(Self::Setup),
                "start" => Ok(Self::Start),
                "stop" => Ok(Self::Stop),
                other => Err(WorkerError::UnknownOperation(other.to_owned())),
            }
        }
    }

    #[derive(Debug, Error)]
    pub enum WorkerError {
        #[error("usage: pg_worker <setup|start|stop> <payload-path>")]
        Usage,
        #[error("unknown operation `{0}`")]
        UnknownOperation(String),
        #[error("failed to read payload {path}: {source}")]
        PayloadRead {
            path: Utf8PathBuf,
            #[source]
            source: BoxError,
        },
        #[error("failed to parse payload: {0}")]
        PayloadParse(#[from] serde_json::Error),
        #[error("invalid cluster settings: {0}")]
        Settings(String),
        #[error("failed to switch to the nobody account: {0}")]
        PrivilegeDrop(String),
        #[error("failed to start runtime: {0}")]
        Runtime(#[from] std::io::Error),
        #[error("{operation:?} failed: {message}")]
        Postgres {
            operation: Operation,
            message: String,
        },
    }

    pub fn run(args: &[String]) -> Result<(), WorkerError> {
        let [_, operation_arg, payload_arg] = args else {
            return Err(WorkerError::Usage);
        };
        let operation = Operation::parse(operation_arg)?;
        let payload = load_payload(Utf8Path::new(payload_arg))?;
        drop_privileges()?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| WorkerError::Settings(err.to_string()))?;
        apply_environment(&payload.environment);

        let runtime = Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(execute(operation, PostgreSQL::new(settings)))
    }

    async fn execute(operation: Operation, mut postgres: PostgreSQL) -> Result<(), WorkerError> {
        let failed = |err: &dyn Display| WorkerError::Postgres {
            operation,
            message: err.to_string(),
        };
        match operation {
            Operation::Setup => {
                postgres.setup().await.map_err(|err| failed(&err))?;
                ensure_started(&mut postgres).await.map_err(|err| failed(&err))
            }
            Operation::Start => {
                ensure_started(&mut postgres).await.map_err(|err| failed(&err))?;
                // Dropping the handle would stop the server once the worker exits.
                let _running = std::mem::ManuallyDrop::new(postgres);
                Ok(())
            }
            Operation::Stop => postgres.stop().await.map_err(|err| failed(&err)),
        }
    }

    async fn ensure_started(postgres: &mut PostgreSQL) -> Result<(), postgresql_embedded::Error> {
        if matches!(postgres.status(), Status::Started) {
            return Ok(());
        }
        postgres.start().await
    }

    fn load_payload(path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
        let read_failed = |source: BoxError| WorkerError::PayloadRead {
            path: path.to_path_buf(),
            source,
        };
        let (dir, relative) = ambient_dir_and_path(path).map_err(|err| read_failed(err.into()))?;
        let mut file = dir
            .open(relative.as_std_path())
            .map_err(|err| read_failed(err.into()))?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|err| read_failed(err.into()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn drop_privileges() -> Result<(), WorkerError> {
        if !Uid::effective().is_root() {
            return Ok(());
        }
        let privilege_error = |err: &dyn Display| WorkerError::PrivilegeDrop(err.to_string());
        let user = User::from_name(UNPRIVILEGED_USER)
            .map_err(|err| privilege_error(&err))?
            .ok_or_else(|| privilege_error(&"account not found"))?;
        let name = CString::new(user.name.clone()).map_err(|err| privilege_error(&err))?;
        initgroups(&name, user.gid).map_err(|err| privilege_error(&err))?;
        setgid(user.gid).map_err(|err| privilege_error(&err))?;
        setuid(user.uid).map_err(|err| privilege_error(&err))?;

        // SAFETY: the worker is single-threaded until the runtime is built.
        unsafe {
            env::set_var("HOME", &user.dir);
            env::set_var("USER", &user.name);
            env::set_var("LOGNAME", &user.name);
        }
        Ok(())
    }

    fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
        for (key, value) in environment {
            // SAFETY: the worker is single-threaded until the runtime is built.
            unsafe {
                match value {
                    Some(secret) => env::set_var(key, secret.expose()),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), worker::WorkerError> {
    let args = std::env::args_os()
        .map(|arg| arg.into_string().map_err(|_| worker::WorkerError::Usage))
        .collect::<Result<Vec<_>, _>>()?;
    worker::run(&args)
}

#[cfg(not(unix))]
fn main() -> Result<(), &'static str> {
    Err("pg_worker requires a Unix host")
}
