//! Blocking wrapper around [`FipeSdk`] for callers without an async runtime.
//!
//! Owns a current-thread Tokio runtime and drives every async SDK operation to
//! completion with [`Runtime::block_on`](tokio::runtime::Runtime::block_on).
//! Must not be used from inside another Tokio runtime.
//!
//! # Example
//!
//! ```no_run
//! use fipe_sdk::{BlockingFipeSdk, Field};
//!
//! let mut sdk = BlockingFipeSdk::builder().build().unwrap();
//! sdk.load_brands();
//! sdk.select(0, Field::Brand, "Fiat").unwrap();
//! let report = sdk.submit();
//! ```

use std::ops::Deref;

use tokio::runtime::{Builder, Runtime};

use crate::error::Result;
use crate::{
    Field, FipeSdk, FipeSdkBuilder, HttpCatalog, MonthNames, Resolution, SubmitReport,
};

// ---------------------------------------------------------------------------
// BlockingFipeSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`BlockingFipeSdk`]; same options as [`FipeSdkBuilder`].
#[derive(Default)]
pub struct BlockingFipeSdkBuilder {
    inner: FipeSdkBuilder,
}

impl BlockingFipeSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn months(mut self, months: &'static MonthNames) -> Self {
        self.inner = self.inner.months(months);
        self
    }

    /// Build the runtime and the underlying SDK.
    pub fn build(self) -> Result<BlockingFipeSdk> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let inner = self.inner.build()?;
        Ok(BlockingFipeSdk { runtime, inner })
    }
}

// ---------------------------------------------------------------------------
// BlockingFipeSdk
// ---------------------------------------------------------------------------

/// Synchronous facade over [`FipeSdk`].
///
/// Read-only accessors are reachable through `Deref`; operations that touch
/// the network block the calling thread.
pub struct BlockingFipeSdk {
    runtime: Runtime,
    inner: FipeSdk<HttpCatalog>,
}

impl BlockingFipeSdk {
    pub fn builder() -> BlockingFipeSdkBuilder {
        BlockingFipeSdkBuilder::default()
    }

    pub fn load_brands(&mut self) -> Resolution {
        self.runtime.block_on(self.inner.load_brands())
    }

    pub fn select(&mut self, index: usize, field: Field, value: &str) -> Result<()> {
        self.runtime.block_on(self.inner.select(index, field, value))
    }

    pub fn commit(&mut self, index: usize, field: Field, option: &str) -> Result<()> {
        self.runtime.block_on(self.inner.commit(index, field, option))
    }

    pub fn submit(&mut self) -> SubmitReport {
        self.runtime.block_on(self.inner.submit())
    }

    pub fn restart(&mut self) -> Resolution {
        self.runtime.block_on(self.inner.restart())
    }

    pub fn add_slot(&mut self) -> bool {
        self.inner.add_slot()
    }

    pub fn remove_slot(&mut self, index: usize) -> bool {
        self.inner.remove_slot(index)
    }

    pub fn clear(&mut self) {
        self.inner.clear()
    }

    /// Mutable access to the async SDK for the filter and event-driven APIs.
    pub fn inner_mut(&mut self) -> &mut FipeSdk<HttpCatalog> {
        &mut self.inner
    }

    /// Consume the wrapper, shutting down its runtime.
    pub fn close(self) {
        drop(self);
    }
}

impl Deref for BlockingFipeSdk {
    type Target = FipeSdk<HttpCatalog>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
