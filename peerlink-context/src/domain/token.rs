use std::marker::PhantomData;

/// Proof that the holder is executing on the signaling thread
///
/// Minted only by [`crate::ConnectionContext::signaling_token`], which
/// asserts the caller's thread at runtime. The token is neither `Send` nor
/// `Sync`, so it cannot
/// leave the thread it was minted on: accessors that require it are
/// impossible to call from anywhere else.
pub struct SignalingToken {
    _pinned: PhantomData<*const ()>,
}

impl SignalingToken {
    pub(crate) fn mint() -> Self {
        Self { _pinned: PhantomData }
    }
}

/// Proof that the holder is executing on the worker thread
///
/// See [`SignalingToken`] for the capability rules.
pub struct WorkerToken {
    _pinned: PhantomData<*const ()>,
}

impl WorkerToken {
    pub(crate) fn mint() -> Self {
        Self { _pinned: PhantomData }
    }
}

/// Proof that the holder is executing on the network thread
///
/// See [`SignalingToken`] for the capability rules.
pub struct NetworkToken {
    _pinned: PhantomData<*const ()>,
}

impl NetworkToken {
    pub(crate) fn mint() -> Self {
        Self { _pinned: PhantomData }
    }
}
