//! The select collaborator the cache fetches catalog rows through.

use alloc::boxed::Box;
use alloc::vec::Vec;
use spacecache_core::{Result, Tuple, Value};

/// Issues a `select` against a server-side space.
///
/// The connection layer implements this; the cache only ever calls it with a
/// catalog id, an access path id and a key of one or two fields. Transport
/// failures should be reported as `Error::Transport`.
///
/// A cache may own its client, borrow it (`&mut C`) or hold it boxed
/// (`Box<dyn SelectClient>`). Closures are adapted with [`SelectFn`].
pub trait SelectClient {
    /// Returns every row of `space` whose `index` key equals `key`.
    fn select(&mut self, space: u32, index: u32, key: &[Value]) -> Result<Vec<Tuple>>;
}

impl<C: SelectClient + ?Sized> SelectClient for &mut C {
    #[inline]
    fn select(&mut self, space: u32, index: u32, key: &[Value]) -> Result<Vec<Tuple>> {
        (**self).select(space, index, key)
    }
}

impl<C: SelectClient + ?Sized> SelectClient for Box<C> {
    #[inline]
    fn select(&mut self, space: u32, index: u32, key: &[Value]) -> Result<Vec<Tuple>> {
        (**self).select(space, index, key)
    }
}

/// Adapts a closure or function into a `SelectClient`.
#[derive(Clone, Copy, Debug)]
pub struct SelectFn<F>(pub F);

impl<F> SelectFn<F>
where
    F: FnMut(u32, u32, &[Value]) -> Result<Vec<Tuple>>,
{
    /// Wraps `f`. Going through here lets closure argument types be inferred.
    pub fn new(f: F) -> Self {
        SelectFn(f)
    }
}

impl<F> SelectClient for SelectFn<F>
where
    F: FnMut(u32, u32, &[Value]) -> Result<Vec<Tuple>>,
{
    #[inline]
    fn select(&mut self, space: u32, index: u32, key: &[Value]) -> Result<Vec<Tuple>> {
        (self.0)(space, index, key)
    }
}
