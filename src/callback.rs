//! Callback forms of the [`StunClient`] operations.
//!
//! Each `*_with` method checks that both handlers were supplied and that a
//! tokio runtime is available before it touches the communicator, then
//! spawns the matching future onto that runtime. Exactly one handler runs,
//! once.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::client::StunClient;
use crate::codec::Reply;
use crate::communicator::Communicator;
use crate::error::Error;
use crate::interpret::MappedEndpoint;

struct Handlers<S, F> {
    on_success: S,
    on_failure: F,
    runtime: Handle,
}

impl<S, F> Handlers<S, F> {
    fn new(
        operation: &'static str,
        on_success: Option<S>,
        on_failure: Option<F>,
    ) -> Result<Self, Error> {
        let (Some(on_success), Some(on_failure)) = (on_success, on_failure) else {
            let error = Error::MissingCallback { operation };
            tracing::error!("{error}");
            return Err(error);
        };
        let Ok(runtime) = Handle::try_current() else {
            let error = Error::NoRuntime { operation };
            tracing::error!("{error}");
            return Err(error);
        };

        Ok(Self {
            on_success,
            on_failure,
            runtime,
        })
    }

    fn attach<T, Fut>(self, future: Fut) -> JoinHandle<()>
    where
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
        T: Send + 'static,
        S: FnOnce(T) + Send + 'static,
        F: FnOnce(Error) + Send + 'static,
    {
        let Self {
            on_success,
            on_failure,
            runtime,
        } = self;

        runtime.spawn(async move {
            match future.await {
                Ok(value) => on_success(value),
                Err(error) => on_failure(error),
            }
        })
    }
}

impl<C> StunClient<C>
where
    C: Communicator,
{
    /// Callback form of [`StunClient::bind`].
    ///
    /// Returns [`Error::MissingCallback`] immediately if either handler is
    /// `None`, and [`Error::NoRuntime`] when called outside a tokio runtime.
    /// In both cases no request is sent and neither handler runs.
    pub fn bind_with<S, F>(
        &self,
        on_success: Option<S>,
        on_failure: Option<F>,
    ) -> Result<JoinHandle<()>, Error>
    where
        S: FnOnce(MappedEndpoint) + Send + 'static,
        F: FnOnce(Error) + Send + 'static,
    {
        let handlers = Handlers::new("bind", on_success, on_failure)?;

        Ok(handlers.attach(self.bind()))
    }

    pub fn send_bind_request_with<S, F>(
        &self,
        on_success: Option<S>,
        on_failure: Option<F>,
    ) -> Result<JoinHandle<()>, Error>
    where
        S: FnOnce(Reply) + Send + 'static,
        F: FnOnce(Error) + Send + 'static,
    {
        let handlers = Handlers::new("send bind request", on_success, on_failure)?;

        Ok(handlers.attach(self.send_bind_request()))
    }

    pub fn send_bind_indication_with<S, F>(
        &self,
        on_success: Option<S>,
        on_failure: Option<F>,
    ) -> Result<JoinHandle<()>, Error>
    where
        S: FnOnce(()) + Send + 'static,
        F: FnOnce(Error) + Send + 'static,
    {
        let handlers = Handlers::new("send bind indication", on_success, on_failure)?;

        Ok(handlers.attach(self.send_bind_indication()))
    }
}
