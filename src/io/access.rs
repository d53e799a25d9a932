// Scoped access grants around sandboxed paths.
//
// Platforms without a sandbox use `Unsandboxed`, where acquiring always
// succeeds and releasing does nothing.

use std::path::{Path, PathBuf};

/// Grants temporary read access to a path and takes it back.
pub trait ScopedAccess {
    /// Returns true when a grant was obtained and must later be released.
    fn start_accessing(&self, path: &Path) -> bool;
    fn stop_accessing(&self, path: &Path);
}

/// No sandbox: every path is already readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsandboxed;

impl ScopedAccess for Unsandboxed {
    fn start_accessing(&self, _path: &Path) -> bool {
        true
    }

    fn stop_accessing(&self, _path: &Path) {}
}

/// Holds a grant for as long as it lives; releases it on drop, including
/// when the work done under it fails or unwinds.
pub struct AccessGuard<'a> {
    access: &'a dyn ScopedAccess,
    path: PathBuf,
    granted: bool,
}

impl<'a> AccessGuard<'a> {
    pub fn acquire(access: &'a dyn ScopedAccess, path: &Path) -> Self {
        let granted = access.start_accessing(path);
        Self {
            access,
            path: path.to_path_buf(),
            granted,
        }
    }

    #[cfg(test)]
    pub fn is_granted(&self) -> bool {
        self.granted
    }
}

impl Drop for AccessGuard<'_> {
    fn drop(&mut self) {
        if self.granted {
            self.access.stop_accessing(&self.path);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::ScopedAccess;
    use std::cell::Cell;
    use std::path::Path;
    use std::rc::Rc;

    /// Counts grants handed out and returned.
    #[derive(Clone, Default)]
    pub struct CountingAccess {
        pub acquired: Rc<Cell<usize>>,
        pub released: Rc<Cell<usize>>,
        pub deny: bool,
    }

    impl ScopedAccess for CountingAccess {
        fn start_accessing(&self, _path: &Path) -> bool {
            if self.deny {
                return false;
            }
            self.acquired.set(self.acquired.get() + 1);
            true
        }

        fn stop_accessing(&self, _path: &Path) {
            self.released.set(self.released.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingAccess;
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let access = CountingAccess::default();
        {
            let guard = AccessGuard::acquire(&access, Path::new("/tmp"));
            assert!(guard.is_granted());
            assert_eq!(access.acquired.get(), 1);
            assert_eq!(access.released.get(), 0);
        }
        assert_eq!(access.released.get(), 1);
    }

    #[test]
    fn test_denied_grant_is_not_released() {
        let access = CountingAccess {
            deny: true,
            ..Default::default()
        };
        {
            let guard = AccessGuard::acquire(&access, Path::new("/tmp"));
            assert!(!guard.is_granted());
        }
        assert_eq!(access.released.get(), 0);
    }

    #[test]
    fn test_guard_releases_on_early_return() {
        fn failing(access: &dyn ScopedAccess) -> Result<(), ()> {
            let _guard = AccessGuard::acquire(access, Path::new("/tmp"));
            Err(())
        }

        let access = CountingAccess::default();
        assert!(failing(&access).is_err());
        assert_eq!(access.acquired.get(), 1);
        assert_eq!(access.released.get(), 1);
    }
}
