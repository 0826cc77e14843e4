use std::sync::Arc;

/// String key/value storage scoped to one browsing session (one tab).
///
/// Mirrors the browser `sessionStorage` surface: reads never fail, writes
/// may (quota, I/O). Implementations use interior mutability so a shared
/// handle can be held by several owners.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}

impl<T> SessionStorage for Arc<T>
where
    T: SessionStorage + ?Sized,
{
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        (**self).remove_item(key)
    }
}
