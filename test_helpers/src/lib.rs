//! Test helpers shared across crates in the strata-config workspace.
//!
//! Currently this crate provides RAII guards for mutating process
//! environment variables from tests.

pub mod env {
    //! Helpers for safely mutating environment variables in tests.
    //!
    //! Each mutation acquires a global mutex and returns an RAII guard that
    //! restores the previous state when dropped. Stacked guards for the same
    //! key restore in LIFO order.
    //!
    //! # Examples
    //!
    //! ```
    //! use strata_config_test_helpers::env;
    //!
    //! let _g = env::set_var("KEY", "VALUE");
    //! // `KEY` is set to `VALUE` for the duration of the guard.
    //! ```

    use std::env;
    use std::ffi::{OsStr, OsString};

    use parking_lot::ReentrantMutex;

    static ENV_MUTEX: ReentrantMutex<()> = ReentrantMutex::new(());

    /// RAII guard restoring an environment variable to its prior value on drop.
    pub struct EnvVarGuard {
        key: String,
        original: Option<OsString>,
    }

    /// Sets an environment variable and returns a guard restoring its prior value.
    pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let key = key.into();
        let original = with_lock(|| {
            let previous = env::var_os(&key);
            unsafe { env::set_var(&key, value) };
            previous
        });
        EnvVarGuard { key, original }
    }

    /// Removes an environment variable and returns a guard restoring its prior value.
    pub fn remove_var<K>(key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        let key = key.into();
        let original = with_lock(|| {
            let previous = env::var_os(&key);
            unsafe { env::remove_var(&key) };
            previous
        });
        EnvVarGuard { key, original }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            let key = self.key.clone();
            let original = self.original.take();
            with_lock(|| match original {
                Some(value) => unsafe { env::set_var(&key, value) },
                None => unsafe { env::remove_var(&key) },
            });
        }
    }

    fn with_lock<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock();
        f()
    }

}
