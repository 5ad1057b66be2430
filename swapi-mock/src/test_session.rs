use crate::{
    error::Error,
    logging,
    mock_configuration::MockConfiguration,
    mock_rule::MockRule,
    mock_server::{MockServer, RuleId},
    runner,
};
use lazy_static::lazy_static;
use std::{
    marker::PhantomData,
    sync::{Condvar, Mutex, PoisonError},
};
use tracing::debug;

lazy_static! {
    static ref TEST_SESSION: TestSession = TestSession::new();
}

/// Serializes test cases over the one mock server.
pub struct TestSession {
    lock: (Mutex<bool>, Condvar),
}

impl TestSession {
    fn new() -> Self {
        Self {
            lock: (Mutex::new(false), Condvar::new()),
        }
    }

    /// Waits for any running session to end, then installs `configuration`.
    ///
    /// All session state is torn down when the returned guard is finished or
    /// dropped, whichever comes first.
    pub fn before_test(configuration: MockConfiguration) -> Result<SessionGuard, Error> {
        logging::init_test_logging();
        TEST_SESSION.enter_test()?;

        // From here on the guard releases the lock on every path.
        let session = SessionGuard { finished: false };

        runner::start_once()?;
        debug!(mode = ?configuration.interaction_mode(), "session started");
        MockServer::configure(configuration)?;

        Ok(session)
    }

    fn enter_test(&self) -> Result<(), Error> {
        let (lock, cond) = &self.lock;
        let mut is_test_running = cond.wait_while(lock.lock()?, |is_test_running| *is_test_running)?;
        *is_test_running = true;

        Ok(())
    }

    fn exit_test(&self) {
        let (lock, cond) = &self.lock;
        let mut is_test_running = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *is_test_running = false;

        cond.notify_one();
    }
}

/// One test case's claim on the mock server.
#[derive(Debug)]
pub struct SessionGuard {
    finished: bool,
}

impl SessionGuard {
    /// Registers `rule` until the returned guard is dropped.
    pub fn mock(&self, rule: MockRule) -> Result<MockGuard<'_>, Error> {
        Ok(MockGuard {
            id: MockServer::add_rule(rule)?,
            _session: PhantomData,
        })
    }

    /// Ends the session, saving recordings and surfacing any error the
    /// server hit while handling requests.
    pub fn finish(mut self) -> Result<(), Error> {
        self.finished = true;
        let result = MockServer::complete();
        TEST_SESSION.exit_test();
        debug!(ok = result.is_ok(), "session finished");

        result
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if !self.finished {
            MockServer::discard();
            TEST_SESSION.exit_test();
            debug!("session discarded");
        }
    }
}

/// Keeps a mock rule registered for as long as it lives.
#[derive(Debug)]
pub struct MockGuard<'a> {
    id: RuleId,
    _session: PhantomData<&'a SessionGuard>,
}

impl Drop for MockGuard<'_> {
    fn drop(&mut self) {
        MockServer::remove_rule(self.id);
    }
}
